#[cfg(test)]
pub mod test {
    use crate::error::GatherError;
    use crate::types::{Kind, ValueDescriptor};

    /// A small but realistic set: every descriptor has a fallback.
    pub fn app_descriptors() -> Vec<ValueDescriptor> {
        vec![
            ValueDescriptor::new(Kind::String, "host")
                .long("host")
                .short('H')
                .env("APP_HOST")
                .fallback("localhost")
                .note("Address to bind."),
            ValueDescriptor::new(Kind::Number, "port")
                .long("port")
                .short('p')
                .env("APP_PORT")
                .fallback(8080),
            ValueDescriptor::new(Kind::Boolean, "verbose")
                .long("verbose")
                .short('v')
                .fallback(false),
            ValueDescriptor::new(Kind::Number, "retries")
                .long("retries")
                .env("APP_RETRIES")
                .fallback(3),
        ]
    }

    pub fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    pub fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Unwrap the violation list of an `InvalidDescriptors` error.
    pub fn violations<T: std::fmt::Debug>(result: Result<T, GatherError>) -> Vec<String> {
        match result {
            Err(GatherError::InvalidDescriptors { violations }) => violations,
            other => panic!("Expected InvalidDescriptors, got: {other:?}"),
        }
    }

    #[test]
    fn app_descriptors_are_valid() {
        assert!(crate::validate::validate_descriptors(&app_descriptors(), "").is_ok());
    }
}
