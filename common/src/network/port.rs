//! # Port Model
//!
//! A [`Port`] is an immutable value: number, transport protocol and the
//! registered service information looked up once at construction time.

use std::fmt;

use crate::error::SpecError;
use crate::services;

/// Transport protocol tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Udp => write!(f, "udp"),
        }
    }
}

/// A single target port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port number, 0-65535.
    pub number: u16,

    /// Transport protocol of the port.
    pub protocol: Protocol,

    /// Registered service name, if the registry knows the port.
    pub service: Option<String>,

    /// One-line description of the service.
    pub description: Option<String>,
}

impl Port {
    pub fn new(
        number: u16,
        protocol: Protocol,
        service: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            number,
            protocol,
            service,
            description,
        }
    }

    /// Builds a `Port` with service information from the embedded registry.
    pub fn from_registry(number: u16, protocol: Protocol) -> Self {
        match services::lookup(protocol, number) {
            Some(entry) => Self::new(
                number,
                protocol,
                Some(entry.name.to_string()),
                Some(entry.description.to_string()),
            ),
            None => Self::new(number, protocol, None, None),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Some(service) => write!(f, "{:>5}/{} [{}]", self.number, self.protocol, service),
            None => write!(f, "{:>5}/{}", self.number, self.protocol),
        }
    }
}

/// Expands a comma separated port specification into registry-enriched ports.
///
/// Accepted items are single numbers (`80`) and inclusive ranges
/// (`1000-1024`).
pub fn expand_port_specs(spec: &str, protocol: Protocol) -> Result<Vec<Port>, SpecError> {
    let mut ports = Vec::new();
    for item in spec.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match item.split_once('-') {
            Some((lo, hi)) => {
                let lo: u16 = lo
                    .trim()
                    .parse()
                    .map_err(|_| SpecError::InvalidPortRange(item.to_string()))?;
                let hi: u16 = hi
                    .trim()
                    .parse()
                    .map_err(|_| SpecError::InvalidPortRange(item.to_string()))?;
                if lo > hi {
                    return Err(SpecError::InvalidPortRange(item.to_string()));
                }
                for number in lo..=hi {
                    ports.push(Port::from_registry(number, protocol));
                }
            }
            None => {
                let number: u16 = item
                    .parse()
                    .map_err(|_| SpecError::InvalidPort(item.to_string()))?;
                ports.push(Port::from_registry(number, protocol));
            }
        }
    }
    if ports.is_empty() {
        return Err(SpecError::EmptyPortSpec);
    }
    Ok(ports)
}
