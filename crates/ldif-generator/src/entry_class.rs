//! Entry classes and the attribute groups they contribute.

use std::fmt;

/// Schema category of a synthesized identity.
///
/// Parsed by exact string match from the entry-class pool. Unknown names are
/// kept verbatim in [`EntryClass::Other`] so the `objectclass:` line echoes
/// them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryClass {
    /// `person`: the bare schema, no contact or mail attributes.
    Person,
    /// `organizationalPerson`: adds contact attributes.
    OrganizationalPerson,
    /// `inetOrgPerson`: adds contact and mail attributes.
    InetOrgPerson,
    /// Any other class name; treated like `organizationalPerson`.
    Other(String),
}

impl EntryClass {
    /// Parses a class name by exact, case-sensitive match.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::EntryClass;
    ///
    /// assert_eq!(EntryClass::parse("inetOrgPerson"), EntryClass::InetOrgPerson);
    /// assert_eq!(
    ///     EntryClass::parse("InetOrgPerson"),
    ///     EntryClass::Other("InetOrgPerson".to_owned())
    /// );
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "person" => Self::Person,
            "organizationalPerson" => Self::OrganizationalPerson,
            "inetOrgPerson" => Self::InetOrgPerson,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the class name written on the `objectclass:` line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Person => "person",
            Self::OrganizationalPerson => "organizationalPerson",
            Self::InetOrgPerson => "inetOrgPerson",
            Self::Other(name) => name,
        }
    }

    /// Returns the attribute groups this class contributes to an add record.
    #[must_use]
    pub const fn attribute_groups(&self) -> AttributeGroups {
        match self {
            Self::Person => AttributeGroups {
                contact: false,
                mail: false,
            },
            Self::OrganizationalPerson | Self::Other(_) => AttributeGroups {
                contact: true,
                mail: false,
            },
            Self::InetOrgPerson => AttributeGroups {
                contact: true,
                mail: true,
            },
        }
    }
}

impl fmt::Display for EntryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional attribute groups emitted for an entry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeGroups {
    /// `ou`, `l` and `telephoneNumber`.
    pub contact: bool,
    /// `mail`, `secretary` and `manager`.
    pub mail: bool,
}
