use std::env;
use tracing::Level;

#[derive(Clone)]
pub(crate) struct ServiceContext {
    pub(crate) service_name: String,
    pub(crate) environment: String,
    pub(crate) component: String,
}

#[derive(Clone)]
pub(crate) struct ObservabilityConfig {
    pub(crate) service_context: ServiceContext,
    /// Fallback filter level when `RUST_LOG` is unset.
    pub(crate) default_level: Level,
    /// Warnings captured during config parsing so they can be logged after tracing is initialized.
    pub(crate) warnings: Vec<String>,
}

impl ObservabilityConfig {
    pub(crate) fn from_env(component: &str) -> Self {
        Self::from_lookup(component, |key| env::var(key).ok())
    }

    fn from_lookup(component: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let component = component.trim().to_string();

        let service_name = lookup("SERVICE_NAME")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| component.clone());

        let environment = lookup("STAGE")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "unknown".to_string());

        let mut warnings = Vec::new();
        let default_level = match lookup("LOG_LEVEL") {
            Some(raw) if !raw.trim().is_empty() => parse_level(&raw).unwrap_or_else(|| {
                warnings.push(format!(
                    "LOG_LEVEL is invalid (value: {raw}); defaulting to INFO"
                ));
                Level::INFO
            }),
            _ => Level::INFO,
        };

        Self {
            service_context: ServiceContext {
                service_name,
                environment,
                component,
            },
            default_level,
            warnings,
        }
    }
}

fn parse_level(input: &str) -> Option<Level> {
    match input.trim().to_ascii_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn falls_back_to_component_and_info() {
        let config = ObservabilityConfig::from_lookup(" worker ", lookup(&[]));

        assert_eq!(config.service_context.service_name, "worker");
        assert_eq!(config.service_context.environment, "unknown");
        assert_eq!(config.service_context.component, "worker");
        assert_eq!(config.default_level, Level::INFO);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn reads_service_stage_and_level() {
        let config = ObservabilityConfig::from_lookup(
            "worker",
            lookup(&[
                ("SERVICE_NAME", "kyc-liveness"),
                ("STAGE", "production"),
                ("LOG_LEVEL", "Warning"),
            ]),
        );

        assert_eq!(config.service_context.service_name, "kyc-liveness");
        assert_eq!(config.service_context.environment, "production");
        assert_eq!(config.default_level, Level::WARN);
    }

    #[test]
    fn invalid_level_is_reported_not_fatal() {
        let config = ObservabilityConfig::from_lookup("worker", lookup(&[("LOG_LEVEL", "loud")]));

        assert_eq!(config.default_level, Level::INFO);
        assert_eq!(config.warnings.len(), 1);
        assert!(config.warnings[0].contains("loud"));
    }
}
