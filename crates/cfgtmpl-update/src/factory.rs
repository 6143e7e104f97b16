//! Builds target macros from request payloads

use crate::request::MacroRequest;
use cfgtmpl_macro::{CommandMacroMap, Macro, MacroError, MacroLimits, ObjectId, ResolvedMacros};

pub struct MacroFactory;

impl MacroFactory {
    /// Turn a requested macro into the macro to compare and persist
    ///
    /// Secrets are never sent back to clients, so a password macro submitted
    /// without a value keeps the effective stored value (direct, else
    /// inherited). Any other missing value becomes empty.
    ///
    /// A missing description takes the effective stored one, else the
    /// description of the command macro with the same name. An explicit
    /// empty description is kept as is.
    ///
    /// # Errors
    /// Returns error if the resulting macro violates `limits`
    pub fn create(
        request: &MacroRequest,
        owner_id: ObjectId,
        existing: &ResolvedMacros,
        command: &CommandMacroMap,
        limits: &MacroLimits,
    ) -> Result<Macro, MacroError> {
        let stored = existing.effective(&request.name);

        let value = match (&request.value, request.is_password) {
            (Some(value), _) => value.clone(),
            (None, true) => stored
                .map(|m| m.value().to_string())
                .unwrap_or_default(),
            (None, false) => String::new(),
        };

        let description = match &request.description {
            Some(description) => description.clone(),
            None => stored
                .map(|m| m.description().to_string())
                .or_else(|| command.get(&request.name).map(|c| c.description().to_string()))
                .unwrap_or_default(),
        };

        Macro::builder(owner_id, request.name.as_str())
            .value(value)
            .password(request.is_password)
            .description(description)
            .build_with(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgtmpl_macro::{CommandMacro, CommandMacroType, MacroMap};

    const OBJECT: ObjectId = ObjectId(1);
    const PARENT: ObjectId = ObjectId(2);

    fn secret(owner: ObjectId, value: &str) -> Macro {
        Macro::builder(owner, "SECRET").value(value).password(true).build().unwrap()
    }

    fn existing(direct: Vec<Macro>, inherited: Vec<Macro>) -> ResolvedMacros {
        let to_map = |v: Vec<Macro>| -> MacroMap {
            v.into_iter().map(|m| (m.name().to_string(), m)).collect()
        };
        ResolvedMacros {
            direct: to_map(direct),
            inherited: to_map(inherited),
        }
    }

    #[test]
    fn plain_macro() {
        let request = MacroRequest::new("TIMEOUT", "30").with_description("seconds");
        let m = MacroFactory::create(
            &request,
            OBJECT,
            &ResolvedMacros::default(),
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();

        assert_eq!(m.owner_id(), OBJECT);
        assert_eq!(m.value(), "30");
        assert_eq!(m.description(), "seconds");
        assert!(!m.is_password());
    }

    #[test]
    fn unchanged_password_keeps_direct_value() {
        let stored = existing(vec![secret(OBJECT, "s3cr3t")], vec![secret(PARENT, "parent")]);
        let m = MacroFactory::create(
            &MacroRequest::password("SECRET", None),
            OBJECT,
            &stored,
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.value(), "s3cr3t");
        assert_eq!(m.owner_id(), OBJECT);
    }

    #[test]
    fn unchanged_password_falls_back_to_inherited_value() {
        let stored = existing(vec![], vec![secret(PARENT, "parent")]);
        let m = MacroFactory::create(
            &MacroRequest::password("SECRET", None),
            OBJECT,
            &stored,
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.value(), "parent");
    }

    #[test]
    fn new_password_value_wins() {
        let stored = existing(vec![secret(OBJECT, "old")], vec![]);
        let m = MacroFactory::create(
            &MacroRequest::password("SECRET", Some("new".into())),
            OBJECT,
            &stored,
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.value(), "new");
    }

    #[test]
    fn missing_plain_value_is_empty() {
        let request = MacroRequest {
            name: "EMPTY".into(),
            value: None,
            is_password: false,
            description: None,
        };
        let m = MacroFactory::create(
            &request,
            OBJECT,
            &ResolvedMacros::default(),
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.value(), "");
    }

    #[test]
    fn limits_are_enforced() {
        let limits = MacroLimits {
            max_value_length: 2,
            ..MacroLimits::default()
        };
        let result = MacroFactory::create(
            &MacroRequest::new("X", "long"),
            OBJECT,
            &ResolvedMacros::default(),
            &CommandMacroMap::new(),
            &limits,
        );
        assert!(matches!(result, Err(MacroError::TooLong { .. })));
    }

    fn warning_command() -> CommandMacroMap {
        let warning = CommandMacro::new(ObjectId(9), CommandMacroType::Service, "WARNING")
            .with_description("warning threshold");
        CommandMacroMap::from([("WARNING".to_string(), warning)])
    }

    #[test]
    fn missing_description_keeps_stored_one() {
        let stored_warning = Macro::builder(OBJECT, "WARNING")
            .value("80")
            .description("custom")
            .build()
            .unwrap();
        let stored = existing(vec![stored_warning], vec![]);
        let m = MacroFactory::create(
            &MacroRequest::new("WARNING", "90"),
            OBJECT,
            &stored,
            &warning_command(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.description(), "custom");
    }

    #[test]
    fn missing_description_falls_back_to_inherited_one() {
        let parent_timeout = Macro::builder(PARENT, "TIMEOUT")
            .value("30")
            .description("seconds")
            .build()
            .unwrap();
        let stored = existing(vec![], vec![parent_timeout]);
        let m = MacroFactory::create(
            &MacroRequest::new("TIMEOUT", "30"),
            OBJECT,
            &stored,
            &CommandMacroMap::new(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.description(), "seconds");
    }

    #[test]
    fn missing_description_falls_back_to_command() {
        let m = MacroFactory::create(
            &MacroRequest::new("WARNING", "80"),
            OBJECT,
            &ResolvedMacros::default(),
            &warning_command(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.description(), "warning threshold");
    }

    #[test]
    fn explicit_empty_description_is_kept() {
        let m = MacroFactory::create(
            &MacroRequest::new("WARNING", "80").with_description(""),
            OBJECT,
            &ResolvedMacros::default(),
            &warning_command(),
            &MacroLimits::default(),
        )
        .unwrap();
        assert_eq!(m.description(), "");
    }
}
