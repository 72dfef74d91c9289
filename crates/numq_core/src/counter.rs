use crate::contract::ValidationError;

/// Producer-side message counter backed by its decimal text form, so growth
/// is unbounded rather than capped at a machine integer width. The counter
/// is process-local and resets on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    digits: String,
}

impl Counter {
    pub fn starting_at(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::new(format!(
                "Counter value must be decimal digits, got '{value}'"
            )));
        }

        if value.len() > 1 && value.starts_with('0') {
            return Err(ValidationError::new(format!(
                "Counter value cannot have leading zeros, got '{value}'"
            )));
        }

        if value == "0" {
            return Err(ValidationError::new("Counter values start at 1"));
        }

        Ok(Self {
            digits: value.to_string(),
        })
    }

    /// Decimal text of the current value, used verbatim as the message body.
    pub fn current(&self) -> &str {
        &self.digits
    }

    pub fn advance(&mut self) {
        let mut bytes = std::mem::take(&mut self.digits).into_bytes();
        let mut index = bytes.len();
        loop {
            if index == 0 {
                // Every digit carried over.
                bytes.insert(0, b'1');
                break;
            }
            index -= 1;
            if bytes[index] == b'9' {
                bytes[index] = b'0';
            } else {
                bytes[index] += 1;
                break;
            }
        }

        self.digits = String::from_utf8(bytes).expect("decimal digits are valid UTF-8");
    }
}
