//! Command definitions
//!
//! Represents one call against the store.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    Set,
    SetNx,
    Update,
    Del,
    Incr,
    Decr,
    LPush,
    RPush,
    LPop,
    RPop,
    Clear,
    ClearList,
    ClearAll,
    Get,
    Exists,
    LExists,
    LLen,
    Keys,
    LKeys,
    Size,
    LSize,
}

impl CommandType {
    /// Every command type, in keyword table order
    pub const ALL: [CommandType; 21] = [
        CommandType::Set,
        CommandType::SetNx,
        CommandType::Update,
        CommandType::Del,
        CommandType::Incr,
        CommandType::Decr,
        CommandType::LPush,
        CommandType::RPush,
        CommandType::LPop,
        CommandType::RPop,
        CommandType::Clear,
        CommandType::ClearList,
        CommandType::ClearAll,
        CommandType::Get,
        CommandType::Exists,
        CommandType::LExists,
        CommandType::LLen,
        CommandType::Keys,
        CommandType::LKeys,
        CommandType::Size,
        CommandType::LSize,
    ];

    /// Keyword used on the wire and in the log
    pub fn keyword(self) -> &'static str {
        match self {
            CommandType::Set => "SET",
            CommandType::SetNx => "SETNX",
            CommandType::Update => "UPDATE",
            CommandType::Del => "DEL",
            CommandType::Incr => "INCR",
            CommandType::Decr => "DECR",
            CommandType::LPush => "LPUSH",
            CommandType::RPush => "RPUSH",
            CommandType::LPop => "LPOP",
            CommandType::RPop => "RPOP",
            CommandType::Clear => "CLEAR",
            CommandType::ClearList => "CLEARLIST",
            CommandType::ClearAll => "CLEARALL",
            CommandType::Get => "GET",
            CommandType::Exists => "EXISTS",
            CommandType::LExists => "LEXISTS",
            CommandType::LLen => "LLEN",
            CommandType::Keys => "KEYS",
            CommandType::LKeys => "LKEYS",
            CommandType::Size => "SIZE",
            CommandType::LSize => "LSIZE",
        }
    }

    /// Case-insensitive keyword lookup
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Whether commands of this type change the store (and get logged)
    pub fn is_mutating(self) -> bool {
        !matches!(
            self,
            CommandType::Get
                | CommandType::Exists
                | CommandType::LExists
                | CommandType::LLen
                | CommandType::Keys
                | CommandType::LKeys
                | CommandType::Size
                | CommandType::LSize
        )
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<K, V> {
    // -------------------------------------------------------------------------
    // Scalar namespace
    // -------------------------------------------------------------------------
    Set { key: K, value: V },
    SetNx { key: K, value: V },
    Update { key: K, value: V },
    Del { key: K },
    Incr { key: K },
    Decr { key: K },

    // -------------------------------------------------------------------------
    // List namespace
    // -------------------------------------------------------------------------
    LPush { key: K, value: V },
    RPush { key: K, value: V },

    /// Pop from the front. Logged with the popped value, `None` as a request.
    LPop { key: K, value: Option<V> },

    /// Pop from the back. Logged with the popped value, `None` as a request.
    RPop { key: K, value: Option<V> },

    // -------------------------------------------------------------------------
    // Clearing
    // -------------------------------------------------------------------------
    Clear,
    ClearList,
    ClearAll,

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------
    Get { key: K },
    Exists { key: K },
    LExists { key: K },
    LLen { key: K },
    Keys,
    LKeys,
    Size,
    LSize,
}

impl<K, V> Command<K, V> {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::SetNx { .. } => CommandType::SetNx,
            Command::Update { .. } => CommandType::Update,
            Command::Del { .. } => CommandType::Del,
            Command::Incr { .. } => CommandType::Incr,
            Command::Decr { .. } => CommandType::Decr,
            Command::LPush { .. } => CommandType::LPush,
            Command::RPush { .. } => CommandType::RPush,
            Command::LPop { .. } => CommandType::LPop,
            Command::RPop { .. } => CommandType::RPop,
            Command::Clear => CommandType::Clear,
            Command::ClearList => CommandType::ClearList,
            Command::ClearAll => CommandType::ClearAll,
            Command::Get { .. } => CommandType::Get,
            Command::Exists { .. } => CommandType::Exists,
            Command::LExists { .. } => CommandType::LExists,
            Command::LLen { .. } => CommandType::LLen,
            Command::Keys => CommandType::Keys,
            Command::LKeys => CommandType::LKeys,
            Command::Size => CommandType::Size,
            Command::LSize => CommandType::LSize,
        }
    }

    /// Operation keyword, e.g. `"LPUSH"`
    pub fn name(&self) -> &'static str {
        self.command_type().keyword()
    }

    pub fn is_mutating(&self) -> bool {
        self.command_type().is_mutating()
    }

    /// The key this command addresses, if any
    pub fn key(&self) -> Option<&K> {
        match self {
            Command::Set { key, .. }
            | Command::SetNx { key, .. }
            | Command::Update { key, .. }
            | Command::Del { key }
            | Command::Incr { key }
            | Command::Decr { key }
            | Command::LPush { key, .. }
            | Command::RPush { key, .. }
            | Command::LPop { key, .. }
            | Command::RPop { key, .. }
            | Command::Get { key }
            | Command::Exists { key }
            | Command::LExists { key }
            | Command::LLen { key } => Some(key),
            Command::Clear
            | Command::ClearList
            | Command::ClearAll
            | Command::Keys
            | Command::LKeys
            | Command::Size
            | Command::LSize => None,
        }
    }

    /// The value this command carries, if any
    pub fn value(&self) -> Option<&V> {
        match self {
            Command::Set { value, .. }
            | Command::SetNx { value, .. }
            | Command::Update { value, .. }
            | Command::LPush { value, .. }
            | Command::RPush { value, .. } => Some(value),
            Command::LPop { value, .. } | Command::RPop { value, .. } => value.as_ref(),
            _ => None,
        }
    }
}
