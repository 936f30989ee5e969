//! LDIF change-record blocks.

use crate::error::OutputError;
use crate::sink::LineSink;

/// One LDIF block: a sequence of lines terminated by an empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdifRecord {
    lines: Vec<String>,
}

impl LdifRecord {
    /// Starts a record with its `dn:` line.
    #[must_use]
    pub fn with_dn(dn: &str) -> Self {
        Self::default().attribute("dn", dn)
    }

    /// Appends an `attribute: value` line.
    #[must_use]
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.lines.push(format!("{name}: {value}"));
        self
    }

    /// Appends a line verbatim.
    #[must_use]
    pub fn raw(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Returns the record lines, without the block separator.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the value of the first `name:` line, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use ldif_generator::LdifRecord;
    ///
    /// let record = LdifRecord::with_dn("ou=Sales,dc=example,dc=com").attribute("ou", "Sales");
    /// assert_eq!(record.value_of("ou"), Some("Sales"));
    /// assert_eq!(record.value_of("mail"), None);
    /// ```
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.values_of(name).next()
    }

    /// Iterates the values of every `name:` line.
    pub fn values_of<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.lines.iter().filter_map(move |line| {
            line.strip_prefix(name)
                .and_then(|rest| rest.strip_prefix(": "))
        })
    }

    /// Writes the lines followed by the empty separator line.
    ///
    /// # Errors
    ///
    /// Propagates any [`OutputError`] from the sink.
    pub fn write_to<S>(&self, sink: &mut S) -> Result<(), OutputError>
    where
        S: LineSink + ?Sized,
    {
        for line in &self.lines {
            sink.write_line(line)?;
        }
        sink.write_line("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{LineEnding, MemorySink, OutputFile};

    #[test]
    fn writes_lines_and_separator() {
        let record = LdifRecord::with_dn("cn=A,dc=x")
            .attribute("changetype", "add")
            .attribute("cn", "A");
        let mut sink = MemorySink::new(LineEnding::Unix);
        sink.start_file(OutputFile::Chunk(0)).expect("start");

        record.write_to(&mut sink).expect("write");

        assert_eq!(
            sink.contents(OutputFile::Chunk(0)),
            Some("dn: cn=A,dc=x\nchangetype: add\ncn: A\n\n")
        );
    }

    #[test]
    fn values_of_matches_whole_attribute_names() {
        let record = LdifRecord::default()
            .attribute("ou", "Sales")
            .attribute("objectclass", "person");

        assert_eq!(record.values_of("ou").collect::<Vec<_>>(), ["Sales"]);
        assert_eq!(record.value_of("o"), None);
    }

    #[test]
    fn values_outlive_the_attribute_name_buffer() {
        let record = LdifRecord::with_dn("cn=A,dc=x").attribute("mail", "a@x.example");

        let mail = {
            let name = String::from("mail");
            record.value_of(&name)
        };

        assert_eq!(mail, Some("a@x.example"));
    }

    #[test]
    fn raw_lines_are_kept_verbatim() {
        let record = LdifRecord::default().raw("cn=A,dc=x");

        assert_eq!(record.lines(), ["cn=A,dc=x"]);
    }
}
