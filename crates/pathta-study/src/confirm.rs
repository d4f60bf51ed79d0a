//! Confirmation gate for destructive operations.

use std::io::{BufRead, Write};

/// Decides whether a destructive operation may proceed.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Always proceeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Asks on stderr and proceeds only on a literal `y`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{prompt} [y/n] ");
        let _ = stderr.flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']) == "y"
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("y\n", true)]
    #[case("y\r\n", true)]
    #[case("Y\n", false)]
    #[case("yes\n", false)]
    #[case("\n", false)]
    fn only_lowercase_y_confirms(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_yes(answer), expected);
    }

    #[test]
    fn closures_receive_the_prompt() {
        let seen = RefCell::new(String::new());
        let gate = |prompt: &str| {
            seen.borrow_mut().push_str(prompt);
            false
        };
        assert!(!gate.confirm("Delete the study Alpha?"));
        assert_eq!(seen.borrow().as_str(), "Delete the study Alpha?");
        assert!(AssumeYes.confirm("anything"));
    }
}
