// SPDX-License-Identifier: Apache-2.0
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    Timestamp { line: u64, value: String },
    Layout(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Error::*;
        match self {
            Io(e) => write!(f, "{e}"),
            Csv(e) => write!(f, "{e}"),
            MissingColumn(name) => write!(f, "Missing column: {name}"),
            Timestamp { line, value } => {
                write!(f, "Unparseable timestamp on line {line}: {value:?}")
            }
            Layout(m) => write!(f, "Layout: {m}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}
