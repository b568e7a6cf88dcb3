use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AirportId(pub usize);

impl AirportId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Airport identified by its name; two airports with the same name are the same airport.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Airport(String);

impl Airport {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Airport {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Airport {
    fn from(name: String) -> Self {
        Self(name)
    }
}
