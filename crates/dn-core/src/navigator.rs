//! The editing session: one document, a working address into it, and the
//! literal-mode flag controlling whether typed input is smart-cast.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cast::smart_cast;
use crate::error::{Error, Result};
use crate::path::{self, Address};
use crate::value;

#[derive(Debug, Clone)]
pub struct Navigator {
    doc: Value,
    cwd: Address,
    file_name: PathBuf,
    literal: bool,
}

impl Navigator {
    pub fn new(doc: Value, file_name: PathBuf, literal: bool) -> Self {
        Self {
            doc,
            cwd: Address::root(),
            file_name,
            literal,
        }
    }

    pub fn doc(&self) -> &Value {
        &self.doc
    }

    pub fn cwd(&self) -> &Address {
        &self.cwd
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn literal(&self) -> bool {
        self.literal
    }

    /// The node the working address points at.
    pub fn current(&self) -> Result<&Value> {
        path::resolve(&self.doc, &self.cwd)
    }

    pub fn get_at(&self, addr: &Address) -> Result<&Value> {
        path::resolve(&self.doc, addr)
    }

    /// Store typed input at the working address, smart-casting when literal
    /// mode is on or the caller forces it.
    pub fn set_current(&mut self, raw: &str, force_cast: bool) -> Result<()> {
        let value = if self.literal || force_cast {
            smart_cast(raw)
        } else {
            Value::String(raw.to_string())
        };
        self.set_current_value(value)
    }

    pub fn set_current_value(&mut self, value: Value) -> Result<()> {
        self.doc = path::replace(&self.doc, &self.cwd, value)?;
        Ok(())
    }

    pub fn set_at(&mut self, addr: &Address, value: Value) -> Result<()> {
        self.doc = path::replace(&self.doc, addr, value)?;
        Ok(())
    }

    /// Move the working address to `addr`, which must resolve.
    pub fn enter(&mut self, addr: &Address) -> Result<()> {
        path::resolve(&self.doc, addr)?;
        self.cwd = addr.clone();
        Ok(())
    }

    /// Swap in a freshly loaded document. The working address is kept when it
    /// still resolves, otherwise it falls back to root so it never dangles.
    pub fn replace_doc(&mut self, doc: Value) {
        self.doc = doc;
        if path::resolve(&self.doc, &self.cwd).is_err() {
            self.cwd = Address::root();
        }
    }

    /// Apply one `cd` segment: `..` ascends, `/` resets to root, anything
    /// else descends iff it is a key/index of the node the walk stands on.
    pub fn step(&mut self, segment: &str) -> Result<()> {
        match segment {
            ".." => {
                if !self.cwd.pop() {
                    return Err(Error::nav("..", "already at document root"));
                }
            }
            "/" | "\\" => self.cwd = Address::root(),
            seg => {
                let node = self.current()?;
                let valid = match node {
                    Value::Object(map) => map.contains_key(seg),
                    Value::Array(items) => seg
                        .parse::<usize>()
                        .map(|i| i < items.len())
                        .unwrap_or(false),
                    _ => false,
                };
                if !valid {
                    return Err(Error::nav(
                        seg,
                        format!("not a child of {}", value::kind_of(node)),
                    ));
                }
                self.cwd.push(seg);
            }
        }
        Ok(())
    }

    /// Interpret `text` as an address relative to the working address.
    /// `.` is the working address itself.
    pub fn relative(&self, text: &str) -> Address {
        let mut addr = self.cwd.clone();
        for seg in text.split(['/', '\\']).filter(|s| !s.is_empty()) {
            match seg {
                "." => {}
                ".." => {
                    addr.pop();
                }
                other => addr.push(other),
            }
        }
        addr
    }

    /// Only boolean-valued public state may be toggled by name.
    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<()> {
        match name {
            "literal" => {
                self.literal = value;
                Ok(())
            }
            other => Err(Error::Flag(other.to_string())),
        }
    }

    /// Name/value pairs of the session state the `print` command exposes.
    pub fn public(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data", value::pretty(&self.doc)),
            ("filename", self.file_name.display().to_string()),
            ("literal", self.literal.to_string()),
            ("path", self.cwd.to_string()),
        ]
    }
}
