use super::StringSupplierRegistrar;
use crate::advice::context::{Invocation, ParameterDescriptor};
use crate::interpolation::converter::ConverterChain;
use crate::interpolation::lookup::SupplierLookup;
use crate::interpolation::value::LogValue;
use std::sync::Arc;

pub const METHOD_KEY: &str = "method";
pub const PARAMETERS_KEY: &str = "parameters";

const NO_PARAMETERS: &str = "none";
const MISSING_ARGUMENT: &str = "null";

/// `{method}` as `Ret name(P1, P2)` and `{parameters}` as the
/// comma-joined argument values, honoring redaction rules
pub struct MethodSignatureRegistrar {
    chain: Arc<ConverterChain>,
    global_excludes: Vec<String>,
}

impl MethodSignatureRegistrar {
    /// `global_excludes` are hidden from every field-filtered parameter
    pub fn new(chain: Arc<ConverterChain>, global_excludes: Vec<String>) -> Self {
        Self {
            chain,
            global_excludes,
        }
    }

    pub fn render_parameters(&self, invocation: &Invocation<'_>) -> String {
        let parameters = invocation.method().parameters();
        let args = invocation.args();
        if parameters.is_empty() || args.is_empty() {
            return NO_PARAMETERS.to_string();
        }

        parameters
            .iter()
            .enumerate()
            .map(|(index, parameter)| match args.get(index) {
                Some(arg) => self.render_argument(parameter, arg),
                None => MISSING_ARGUMENT.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The parameter's rule wins over one declared on the value's type
    fn render_argument(&self, parameter: &ParameterDescriptor, arg: &LogValue) -> String {
        let rule = parameter
            .redaction()
            .cloned()
            .or_else(|| arg.declared_redaction());
        match rule {
            Some(rule) => rule.render(arg, &self.global_excludes),
            None => self.chain.render(arg),
        }
    }
}

impl<'i, 'm> StringSupplierRegistrar<&'i Invocation<'m>> for MethodSignatureRegistrar {
    fn register<'a>(&'a self, lookup: &mut SupplierLookup<'a>, source: &'i Invocation<'m>)
    where
        &'i Invocation<'m>: 'a,
    {
        lookup.add_supplier(METHOD_KEY, move || source.method().signature());
        lookup.add_supplier(PARAMETERS_KEY, move || self.render_parameters(source));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advice::context::MethodDescriptor;
    use crate::config::ConverterProperties;
    use crate::interpolation::lookup::StringLookup;
    use crate::interpolation::redaction::{Redaction, REDACTION_MARKER};
    use crate::interpolation::value::{AsLogValue, Loggable};

    #[derive(Debug)]
    struct Citizen {
        name: String,
        ssn: String,
    }

    impl Loggable for Citizen {
        fn fields(&self) -> Vec<(&'static str, LogValue)> {
            vec![("name", self.name.as_log_value()), ("ssn", self.ssn.as_log_value())]
        }
    }

    #[derive(Debug)]
    struct ApiKey(String);

    impl Loggable for ApiKey {
        fn redaction(&self) -> Option<Redaction> {
            Some(Redaction::Hidden)
        }
    }

    fn registrar() -> MethodSignatureRegistrar {
        let props = ConverterProperties::default();
        MethodSignatureRegistrar::new(
            Arc::new(ConverterChain::new(&props).unwrap()),
            props.effective_exclude_field_names(),
        )
    }

    fn render(method: &MethodDescriptor, args: Vec<LogValue>) -> (String, String) {
        let registrar = registrar();
        let invocation = Invocation::new(method, args);
        let mut lookup = SupplierLookup::new();
        registrar.register(&mut lookup, &invocation);
        (
            lookup.lookup(METHOD_KEY).unwrap_or_default(),
            lookup.lookup(PARAMETERS_KEY).unwrap_or_default(),
        )
    }

    #[test]
    fn test_signature_and_values() {
        let method = MethodDescriptor::new("shop::Cart", "add")
            .param("alloc::string::String")
            .param("u32")
            .returns("bool");
        let (signature, params) = render(&method, vec!["apple".as_log_value(), 3u32.as_log_value()]);
        assert_eq!(signature, "bool add(String, u32)");
        assert_eq!(params, "apple, 3");
    }

    #[test]
    fn test_no_parameters() {
        let method = MethodDescriptor::new("shop::Cart", "clear");
        assert_eq!(render(&method, vec![]), ("() clear()".to_string(), "none".to_string()));

        let method = MethodDescriptor::new("shop::Cart", "add").param("u32");
        assert_eq!(render(&method, vec![]).1, "none");
    }

    #[test]
    fn test_missing_argument_renders_null() {
        let method = MethodDescriptor::new("shop::Cart", "add").param("u32").param("u32");
        assert_eq!(render(&method, vec![1u32.as_log_value()]).1, "1, null");
    }

    #[test]
    fn test_hidden_parameter() {
        let method = MethodDescriptor::new("auth::Login", "login")
            .param("String")
            .redacted_param("String", Redaction::Hidden);
        let (_, params) = render(&method, vec!["bob".as_log_value(), "pw".as_log_value()]);
        assert_eq!(params, format!("bob, {}", REDACTION_MARKER));
    }

    #[test]
    fn test_field_filtered_parameter_keeps_other_fields() {
        let method = MethodDescriptor::new("gov::Registry", "register")
            .redacted_param("Citizen", Redaction::fields(["SSN"]));
        let citizen = LogValue::object(Citizen {
            name: "A".into(),
            ssn: "123".into(),
        });
        let (_, params) = render(&method, vec![citizen]);
        assert_eq!(params, "{\"name\":\"A\"}");
    }

    #[test]
    fn test_type_level_rule_applies_without_parameter_rule() {
        let method = MethodDescriptor::new("api::Client", "connect").param("ApiKey");
        let (_, params) = render(&method, vec![LogValue::object(ApiKey("k".into()))]);
        assert_eq!(params, REDACTION_MARKER);
    }
}
