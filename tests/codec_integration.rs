//! Refined decoding through the host codecs
//!
//! JSON and serde cases need the `json` feature, TOML cases need `toml`;
//! tracing cases need `tracing`.

use sluice::codec::config::{Config, ConfigError, Key};
use sluice::codec::{Decoder, DecoderExt};
use sluice::error::FieldPath;
use sluice::refined::{NonEmptyText, Percent, Port, PortNumber};
use sluice::{Validation, ValidationError, ValidationErrors};

const SERVICE: &str = r#"
# ledger service
name = "ledger"
port = 70000
load = 42
"#;

fn field<D>(decoder: D, config: &Config) -> Validation<D::Value, ValidationErrors>
where
    D: Decoder<Config, Error = ConfigError>,
{
    match decoder.decode(config) {
        Ok(value) => Validation::Success(value),
        Err(ConfigError::Refinement(err)) => Validation::Failure(err.into()),
        Err(other) => panic!("unexpected {}", other),
    }
}

#[test]
fn config_refinement_failures_accumulate() {
    let config: Config = SERVICE.parse().unwrap();

    let checked = Validation::all((
        field(Key::<String>::new("name").refined::<NonEmptyText>(), &config),
        field(Key::<u32>::new("port").refined::<Port>(), &config),
        field(Key::<i64>::new("load").refined::<Percent>(), &config),
    ));

    let errors = checked.into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.to_string(),
        "port: invalid Port: Predicate failed: (70000 in [1, 65535])."
    );
}

#[test]
fn base_decoding_failure_is_not_a_refinement() {
    let config: Config = "port = eighty".parse().unwrap();
    let err = Key::<u16>::new("port")
        .refined::<Port>()
        .decode(&config)
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn at_places_error_under_nested_path() {
    let config: Config = "port = 0".parse().unwrap();
    let decoder = Key::<u16>::new("port")
        .at(FieldPath::root("server").child("port"))
        .refined::<Port>();

    match decoder.decode(&config) {
        Err(ConfigError::Refinement(err)) => {
            assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("server.port"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn accepted_port_keeps_type() {
    let config: Config = "port = 8443".parse().unwrap();
    let port: PortNumber<u16> = Key::<u16>::new("port").refined::<Port>().decode(&config).unwrap();
    assert_eq!(port.into_inner(), 8443);
}

#[test]
fn validation_error_is_its_own_refinement_failure() {
    struct Raw;

    impl Decoder<str> for Raw {
        type Value = String;
        type Error = ValidationError;

        fn decode(&self, input: &str) -> Result<String, ValidationError> {
            Ok(input.to_string())
        }
    }

    let err = Raw.refined::<NonEmptyText>().decode("").unwrap_err();
    assert_eq!(err.refinement(), Some("NonEmptyText"));
}

#[cfg(feature = "json")]
mod json {
    use serde::Deserialize;
    use serde_json::json;
    use sluice::codec::json::{Field, JsonError};
    use sluice::codec::{Decoder, DecoderExt};
    use sluice::refined::{NonEmptyString, Percentage, Positive, PosInt};

    #[derive(Debug, Deserialize)]
    struct Order {
        customer: NonEmptyString,
        quantity: PosInt<u32>,
        discount: Percentage<u8>,
    }

    #[test]
    fn serde_rejects_invalid_field() {
        let ok: Order = serde_json::from_value(json!({
            "customer": "Cloud",
            "quantity": 3,
            "discount": 10
        }))
        .unwrap();
        assert_eq!(*ok.quantity, 3);
        assert_eq!(ok.customer.get(), "Cloud");
        assert_eq!(*ok.discount, 10);

        let err = serde_json::from_str::<Order>(
            r#"{"customer": "Cloud", "quantity": 3, "discount": 120}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid Percent"), "{}", err);
    }

    #[test]
    fn field_reports_pointer_as_path() {
        let doc = json!({ "lines": [ { "qty": 2 }, { "qty": 0 } ] });

        let first = Field::<u32>::new("/lines/0/qty").refined::<Positive>();
        assert_eq!(*first.decode(&doc).unwrap(), 2);

        let second = Field::<u32>::new("/lines/1/qty").refined::<Positive>();
        match second.decode(&doc).unwrap_err() {
            JsonError::Refinement(err) => assert_eq!(
                err.to_string(),
                "lines[1].qty: invalid Positive: Predicate failed: (0 > 0)."
            ),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[cfg(feature = "toml")]
mod toml_host {
    use serde::Deserialize;
    use sluice::codec::toml::{Entry, TomlError};
    use sluice::codec::{Decoder, DecoderExt};
    use sluice::refined::{NonEmptyString, Percentage, Port, PortNumber};
    use sluice::{Validation, ValidationErrors};

    const SERVICE: &str = r#"
name = "ledger"

[listen]
port = 0

[limits]
load = 140
"#;

    #[derive(Debug, Deserialize)]
    struct Listen {
        port: PortNumber<u16>,
    }

    #[derive(Debug, Deserialize)]
    struct Service {
        name: NonEmptyString,
        listen: Listen,
        limits: Limits,
    }

    #[derive(Debug, Deserialize)]
    struct Limits {
        load: Percentage<u8>,
    }

    fn refined<D>(decoder: D, doc: &toml::Table) -> Validation<D::Value, ValidationErrors>
    where
        D: Decoder<toml::Table, Error = TomlError>,
    {
        match decoder.decode(doc) {
            Ok(value) => Validation::Success(value),
            Err(TomlError::Refinement(err)) => Validation::Failure(err.into()),
            Err(other) => panic!("unexpected {}", other),
        }
    }

    #[test]
    fn toml_refinement_failures_accumulate() {
        let doc: toml::Table = SERVICE.parse().unwrap();

        let checked = Validation::all((
            refined(Entry::<String>::new("name").refined::<sluice::refined::NonEmptyText>(), &doc),
            refined(Entry::<u16>::new("listen.port").refined::<Port>(), &doc),
            refined(Entry::<i32>::new("limits.load").refined::<sluice::refined::Percent>(), &doc),
        ));

        let errors = checked.into_result().unwrap_err();
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "listen.port: invalid Port: Predicate failed: (0 in [1, 65535]).".to_string(),
                "limits.load: invalid Percent: Predicate failed: (140 in [0, 100]).".to_string(),
            ]
        );
    }

    #[test]
    fn serde_through_toml_rejects_invalid_field() {
        let err = toml::from_str::<Service>(SERVICE).unwrap_err();
        assert!(err.to_string().contains("invalid Port"), "{}", err);

        let ok: Service = toml::from_str(
            "name = \"ledger\"\n[listen]\nport = 8080\n[limits]\nload = 40\n",
        )
        .unwrap();
        assert_eq!(ok.name.get(), "ledger");
        assert_eq!(*ok.listen.port, 8080);
        assert_eq!(*ok.limits.load, 40);
    }
}

#[cfg(feature = "tracing")]
mod tracing_events {
    use sluice::codec::config::{Config, Key};
    use sluice::codec::{Decoder, DecoderExt};
    use sluice::predicate::prelude::*;
    use sluice::refined::Port;
    use sluice::Registry;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn rejected_decode_is_logged() {
        let config: Config = "port = 0".parse().unwrap();
        let _ = Key::<u16>::new("port").refined::<Port>().decode(&config);
        assert!(logs_contain("decoded value rejected"));
        assert!(logs_contain("Port"));
    }

    #[traced_test]
    #[test]
    fn registry_lookups_are_logged() {
        let mut registry = Registry::new();
        registry.register::<String>("Trimmed", trimmed()).unwrap();
        let _ = registry.register::<String>("Trimmed", trimmed());
        let _ = registry.validator::<String>("Missing");

        assert!(logs_contain("refinement registered"));
        assert!(logs_contain("duplicate refinement registration rejected"));
        assert!(logs_contain("unknown name"));
    }
}
