//! Response definitions
//!
//! Represents the result of executing a command.

use std::fmt;

/// A successful reply from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<K, V> {
    /// Mutation applied, nothing to return
    Ok,

    /// A single value (popped, incremented or decremented)
    Value(V),

    /// A key together with its value (GET)
    Entry(K, V),

    /// Membership answer (EXISTS, LEXISTS)
    Bool(bool),

    /// A count (SIZE, LSIZE, LLEN)
    Count(usize),

    /// Key listing (KEYS, LKEYS), unordered
    Keys(Vec<K>),
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Reply<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => f.write_str("OK"),
            Reply::Value(value) => write!(f, "{}", value),
            Reply::Entry(key, value) => write!(f, "{} => {}", key, value),
            Reply::Bool(b) => write!(f, "{}", b),
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Keys(keys) => {
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}", key)?;
                }
                Ok(())
            }
        }
    }
}
