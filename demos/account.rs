//! Account validation demo
//!
//! Validates a well-formed and a malformed account, printing every
//! failure of the second. Run with `cargo run --example account`
//! (add `--features tracing` to see the library's debug events).

use sluice::predicate::prelude::*;
use sluice::refined::Percentage;
use sluice::{refinement, Refined, Registry, RegistryError, Validation, ValidationErrors, Validator};

refinement! {
    /// Eight ASCII digits
    pub AccountNumber: String => Rule::leaf(size(8)).and(forall(digit()));

    /// 1 to 20 letters or digits
    pub Username: String => Rule::<String>::all_of([
        Rule::leaf(non_empty()),
        Rule::leaf(max_size(20)),
        Rule::leaf(forall(letter_or_digit())),
    ]);
}

#[derive(Debug)]
#[allow(dead_code)]
struct Account {
    number: Refined<String, AccountNumber>,
    username: Refined<String, Username>,
    email: String,
    score: Percentage<i32>,
}

fn validate_account(
    email_rule: &Validator<String>,
    number: &str,
    username: &str,
    email: &str,
    score: i32,
) -> Validation<Account, ValidationErrors> {
    Validation::all((
        Refined::<_, AccountNumber>::validate_field(number.to_string(), "accountNumber"),
        Refined::<_, Username>::validate_field(username.to_string(), "username"),
        email_rule.validate_field(email.to_string(), "email"),
        Percentage::<i32>::validate_field(score, "score"),
    ))
    .map(|(number, username, email, score)| Account {
        number,
        username,
        email,
        score,
    })
}

fn report(label: &str, result: Validation<Account, ValidationErrors>) {
    println!("--- {} ---", label);
    match result {
        Validation::Success(account) => println!("valid: {:?}", account),
        Validation::Failure(errors) => {
            println!("{} error(s):", errors.len());
            for error in errors.iter() {
                println!("  {}", error);
            }
        }
    }
    println!();
}

fn main() -> Result<(), RegistryError> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let registry = Registry::with_defaults();
    let email = registry.validator::<String>("Email")?;

    report(
        "well-formed",
        validate_account(&email, "00000042", "Cloud", "cloud@avalanche.com", 100),
    );
    report(
        "malformed",
        validate_account(&email, "58", "!*Invalid", "woops", -3),
    );
    Ok(())
}
