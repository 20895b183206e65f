//! POSIX-style open flag strings (`"a"`, `"a+"`, `"wx"`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use tokio::fs::OpenOptions;

use crate::error::AppendError;

/// Access mode requested when a target path is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlag {
    name: &'static str,
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub create: bool,
    pub truncate: bool,
    /// Fail if the file already exists
    pub exclusive: bool,
    /// Open for synchronous I/O (`O_SYNC`)
    pub sync: bool,
}

impl OpenFlag {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            read: false,
            write: false,
            append: false,
            create: false,
            truncate: false,
            exclusive: false,
            sync: false,
        }
    }

    /// Append-create: the default flag for append operations.
    pub const APPEND: OpenFlag = OpenFlag {
        append: true,
        create: true,
        ..OpenFlag::new("a")
    };

    /// Parse a flag string. Returns `None` for unsupported strings.
    pub fn parse(flag: &str) -> Option<Self> {
        let parsed = match flag {
            "r" => OpenFlag {
                read: true,
                ..OpenFlag::new("r")
            },
            "rs" | "sr" => OpenFlag {
                read: true,
                sync: true,
                ..OpenFlag::new("rs")
            },
            "r+" => OpenFlag {
                read: true,
                write: true,
                ..OpenFlag::new("r+")
            },
            "rs+" | "sr+" => OpenFlag {
                read: true,
                write: true,
                sync: true,
                ..OpenFlag::new("rs+")
            },
            "w" => OpenFlag {
                write: true,
                create: true,
                truncate: true,
                ..OpenFlag::new("w")
            },
            "wx" | "xw" => OpenFlag {
                write: true,
                create: true,
                exclusive: true,
                ..OpenFlag::new("wx")
            },
            "w+" => OpenFlag {
                read: true,
                write: true,
                create: true,
                truncate: true,
                ..OpenFlag::new("w+")
            },
            "wx+" | "xw+" => OpenFlag {
                read: true,
                write: true,
                create: true,
                exclusive: true,
                ..OpenFlag::new("wx+")
            },
            "a" => OpenFlag::APPEND,
            "ax" | "xa" => OpenFlag {
                exclusive: true,
                ..OpenFlag::APPEND.renamed("ax")
            },
            "as" | "sa" => OpenFlag {
                sync: true,
                ..OpenFlag::APPEND.renamed("as")
            },
            "a+" => OpenFlag {
                read: true,
                ..OpenFlag::APPEND.renamed("a+")
            },
            "ax+" | "xa+" => OpenFlag {
                read: true,
                exclusive: true,
                ..OpenFlag::APPEND.renamed("ax+")
            },
            "as+" | "sa+" => OpenFlag {
                read: true,
                sync: true,
                ..OpenFlag::APPEND.renamed("as+")
            },
            _ => return None,
        };
        Some(parsed)
    }

    const fn renamed(self, name: &'static str) -> Self {
        OpenFlag { name, ..self }
    }

    /// Canonical flag string.
    pub fn as_str(&self) -> &'static str {
        self.name
    }

    /// Whether the file may be created by this open.
    pub fn creates(&self) -> bool {
        self.create || self.exclusive
    }

    /// Translate the flag into tokio open options, including the creation
    /// mode on Unix.
    pub(crate) fn to_open_options(self, mode: u32) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .append(self.append)
            .truncate(self.truncate);

        if self.exclusive {
            options.create_new(true);
        } else {
            options.create(self.create);
        }

        #[cfg(unix)]
        {
            options.mode(mode);
            if self.sync {
                options.custom_flags(libc::O_SYNC);
            }
        }
        #[cfg(not(unix))]
        let _ = mode;

        options
    }
}

impl Default for OpenFlag {
    fn default() -> Self {
        OpenFlag::APPEND
    }
}

impl fmt::Display for OpenFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for OpenFlag {
    type Err = AppendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpenFlag::parse(s).ok_or_else(|| AppendError::InvalidFlag(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for OpenFlag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let flag = String::deserialize(deserializer)?;
        flag.parse::<OpenFlag>().map_err(serde::de::Error::custom)
    }
}
