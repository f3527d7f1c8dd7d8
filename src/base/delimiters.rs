//! Separator strings used to build parameter paths.
//!
//! Every source format supplies its own delimiters. The core never assumes a
//! particular lexical style; it only threads these strings through path
//! construction and path parsing.

/// Path, type and namespace separators of one source format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiters {
    path: String,
    type_: String,
    namespace: String,
}

impl Delimiters {
    pub fn new(
        path: impl Into<String>,
        type_: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            type_: type_.into(),
            namespace: namespace.into(),
        }
    }

    /// Delimiters used for WSDL messages (`findIn;Cust+Customer;id+int`).
    pub fn wsdl() -> Self {
        Self::new(";", "+", "#")
    }

    /// Delimiters used by the Java parser (`person:Person/name:String`).
    pub fn java() -> Self {
        Self::new("/", ":", ".")
    }

    pub fn path_delimiter(&self) -> &str {
        &self.path
    }

    pub fn type_delimiter(&self) -> &str {
        &self.type_
    }

    pub fn namespace_delimiter(&self) -> &str {
        &self.namespace
    }

    /// The path delimiter escaped for use inside a regular expression.
    pub fn quoted_path_delimiter(&self) -> String {
        regex::escape(&self.path)
    }

    /// The type delimiter escaped for use inside a regular expression.
    pub fn quoted_type_delimiter(&self) -> String {
        regex::escape(&self.type_)
    }

    /// The namespace delimiter escaped for use inside a regular expression.
    pub fn quoted_namespace_delimiter(&self) -> String {
        regex::escape(&self.namespace)
    }
}
