//! Command codes for the file-broker protocol.
//!
//! The command space is fixed and centrally defined here. Codes 0 and 1 are
//! reserved; operation codes start at 2. Values outside the known set are
//! legal wire input: they resolve to `None` at dispatch time rather than
//! being rejected when the message is parsed.

/// Reserved command code (never use).
pub const RESERVED_COMMAND_CODE: u16 = 0;

/// Operation selector carried in a message event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CommandCode {
    /// Open an existing file.
    Open = 2,
    /// Close an open handle.
    Close = 3,
    /// Create a new file.
    Create = 4,
    Length = 5,
    Read = 6,
    Append = 7,
    Seek = 8,
    Remove = 9,
    /// Positional read.
    Pread = 10,
    Mkdirs = 11,
    Shutdown = 12,
    Status = 13,
    Flush = 14,
    Sync = 15,
    Rmdir = 16,
    Readdir = 17,
    Exists = 18,
    Rename = 19,
}

impl CommandCode {
    /// Every command in the protocol, in code order.
    pub const ALL: [CommandCode; 18] = [
        CommandCode::Open,
        CommandCode::Close,
        CommandCode::Create,
        CommandCode::Length,
        CommandCode::Read,
        CommandCode::Append,
        CommandCode::Seek,
        CommandCode::Remove,
        CommandCode::Pread,
        CommandCode::Mkdirs,
        CommandCode::Shutdown,
        CommandCode::Status,
        CommandCode::Flush,
        CommandCode::Sync,
        CommandCode::Rmdir,
        CommandCode::Readdir,
        CommandCode::Exists,
        CommandCode::Rename,
    ];

    /// Resolve a raw wire value to a known command.
    ///
    /// Total over all inputs: unknown values yield `None`, never a panic.
    pub fn from_u16(code: u16) -> Option<CommandCode> {
        match code {
            2 => Some(CommandCode::Open),
            3 => Some(CommandCode::Close),
            4 => Some(CommandCode::Create),
            5 => Some(CommandCode::Length),
            6 => Some(CommandCode::Read),
            7 => Some(CommandCode::Append),
            8 => Some(CommandCode::Seek),
            9 => Some(CommandCode::Remove),
            10 => Some(CommandCode::Pread),
            11 => Some(CommandCode::Mkdirs),
            12 => Some(CommandCode::Shutdown),
            13 => Some(CommandCode::Status),
            14 => Some(CommandCode::Flush),
            15 => Some(CommandCode::Sync),
            16 => Some(CommandCode::Rmdir),
            17 => Some(CommandCode::Readdir),
            18 => Some(CommandCode::Exists),
            19 => Some(CommandCode::Rename),
            _ => None,
        }
    }

    /// Raw wire value of this command.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Operation name, used in log records.
    pub fn name(self) -> &'static str {
        match self {
            CommandCode::Open => "open",
            CommandCode::Close => "close",
            CommandCode::Create => "create",
            CommandCode::Length => "length",
            CommandCode::Read => "read",
            CommandCode::Append => "append",
            CommandCode::Seek => "seek",
            CommandCode::Remove => "remove",
            CommandCode::Pread => "pread",
            CommandCode::Mkdirs => "mkdirs",
            CommandCode::Shutdown => "shutdown",
            CommandCode::Status => "status",
            CommandCode::Flush => "flush",
            CommandCode::Sync => "sync",
            CommandCode::Rmdir => "rmdir",
            CommandCode::Readdir => "readdir",
            CommandCode::Exists => "exists",
            CommandCode::Rename => "rename",
        }
    }
}
