//! Minimal typed option registry and argv matching.
//!
//! This crate is intentionally small and dependency-free. Options are declared
//! on a [`registry::Registry`], which hands back a typed [`registry::Handle`]
//! for each declaration. After matching `argv`, values are looked up through
//! those handles, never by flag name.

pub mod registry {
    use std::fmt;
    use std::marker::PhantomData;
    use std::path::PathBuf;

    /// Shape of the value an option accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ValueKind {
        Bool,
        String,
        Int,
        Path,
        StringList,
        PathList,
    }

    impl ValueKind {
        /// Whether the option consumes a value from argv.
        pub fn takes_value(self) -> bool {
            !matches!(self, Self::Bool)
        }

        /// Whether repeated occurrences accumulate instead of replacing.
        pub fn is_list(self) -> bool {
            matches!(self, Self::StringList | Self::PathList)
        }

        fn placeholder(self) -> Option<&'static str> {
            match self {
                Self::Bool => None,
                Self::String => Some("<value>"),
                Self::Int => Some("<int>"),
                Self::Path => Some("<path>"),
                Self::StringList => Some("<value>..."),
                Self::PathList => Some("<path>..."),
            }
        }
    }

    /// Shell completion hint attached to a declaration.
    ///
    /// Hints are advisory; matched values are never checked against them.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Completion {
        Filename,
        Values(Vec<(String, String)>),
    }

    impl Completion {
        /// Build a `Values` hint from `(value, description)` pairs.
        pub fn values(pairs: &[(&str, &str)]) -> Self {
            Self::Values(
                pairs
                    .iter()
                    .map(|(v, d)| (v.to_string(), d.to_string()))
                    .collect(),
            )
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct OptionDecl {
        flag: String,
        kind: ValueKind,
        usage: String,
        completion: Option<Completion>,
    }

    impl OptionDecl {
        pub fn flag(&self) -> &str {
            &self.flag
        }

        pub fn kind(&self) -> ValueKind {
            self.kind
        }

        pub fn usage(&self) -> &str {
            &self.usage
        }

        pub fn completion(&self) -> Option<&Completion> {
            self.completion.as_ref()
        }

        /// Flag plus value placeholder, e.g. `--project <path>`.
        pub fn synopsis(&self) -> String {
            match self.kind.placeholder() {
                Some(p) => format!("{} {p}", self.flag),
                None => self.flag.clone(),
            }
        }
    }

    /// A matched value before it is handed out through a typed handle.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RawValue {
        Bool(bool),
        String(String),
        Int(i64),
        Path(PathBuf),
        StringList(Vec<String>),
        PathList(Vec<PathBuf>),
    }

    /// Rust types that can be read back through a [`Handle`].
    pub trait OptionValue: Sized {
        const KIND: ValueKind;

        fn from_raw(raw: &RawValue) -> Option<Self>;
    }

    impl OptionValue for bool {
        const KIND: ValueKind = ValueKind::Bool;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::Bool(b) => Some(*b),
                _ => None,
            }
        }
    }

    impl OptionValue for String {
        const KIND: ValueKind = ValueKind::String;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::String(s) => Some(s.clone()),
                _ => None,
            }
        }
    }

    impl OptionValue for i64 {
        const KIND: ValueKind = ValueKind::Int;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::Int(n) => Some(*n),
                _ => None,
            }
        }
    }

    impl OptionValue for PathBuf {
        const KIND: ValueKind = ValueKind::Path;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::Path(p) => Some(p.clone()),
                _ => None,
            }
        }
    }

    impl OptionValue for Vec<String> {
        const KIND: ValueKind = ValueKind::StringList;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::StringList(v) => Some(v.clone()),
                _ => None,
            }
        }
    }

    impl OptionValue for Vec<PathBuf> {
        const KIND: ValueKind = ValueKind::PathList;

        fn from_raw(raw: &RawValue) -> Option<Self> {
            match raw {
                RawValue::PathList(v) => Some(v.clone()),
                _ => None,
            }
        }
    }

    /// Opaque reference to a declaration, typed by the value it yields.
    ///
    /// A handle is only meaningful for the registry that issued it.
    pub struct Handle<T> {
        index: usize,
        _value: PhantomData<fn() -> T>,
    }

    impl<T> Handle<T> {
        pub(crate) fn index(&self) -> usize {
            self.index
        }
    }

    impl<T> Clone for Handle<T> {
        fn clone(&self) -> Self {
            *self
        }
    }

    impl<T> Copy for Handle<T> {}

    impl<T> fmt::Debug for Handle<T> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_tuple("Handle").field(&self.index).finish()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum RegistryError {
        DuplicateFlag { flag: String },
    }

    impl fmt::Display for RegistryError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::DuplicateFlag { flag } => {
                    write!(f, "option definition conflict: {flag} is already registered")
                }
            }
        }
    }

    impl std::error::Error for RegistryError {}

    /// Declared options for one command.
    #[derive(Debug, Clone, Default)]
    pub struct Registry {
        name: String,
        summary: String,
        decls: Vec<OptionDecl>,
    }

    pub(crate) fn normalize_long(raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.starts_with("--") {
            trimmed.to_string()
        } else {
            format!("--{}", trimmed.trim_start_matches('-'))
        }
    }

    impl Registry {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                ..Self::default()
            }
        }

        pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
            self.summary = summary.into();
            self
        }

        pub fn name(&self) -> &str {
            &self.name
        }

        pub fn summary(&self) -> &str {
            &self.summary
        }

        /// Declare an option. The value kind follows from `T`.
        ///
        /// Registering the same flag twice is a definition error.
        pub fn add<T: OptionValue>(
            &mut self,
            flag: &str,
            usage: &str,
            completion: Option<Completion>,
        ) -> Result<Handle<T>, RegistryError> {
            let flag = normalize_long(flag);
            if self.lookup(&flag).is_some() {
                return Err(RegistryError::DuplicateFlag { flag });
            }
            let index = self.decls.len();
            self.decls.push(OptionDecl {
                flag,
                kind: T::KIND,
                usage: usage.to_string(),
                completion,
            });
            Ok(Handle {
                index,
                _value: PhantomData,
            })
        }

        /// Declaration behind `handle`.
        ///
        /// Panics if `handle` was issued by a different registry with more options.
        pub fn decl<T>(&self, handle: &Handle<T>) -> &OptionDecl {
            &self.decls[handle.index()]
        }

        /// Declarations in registration order.
        pub fn iter(&self) -> impl Iterator<Item = &OptionDecl> {
            self.decls.iter()
        }

        pub fn len(&self) -> usize {
            self.decls.len()
        }

        pub fn is_empty(&self) -> bool {
            self.decls.is_empty()
        }

        pub(crate) fn lookup(&self, flag: &str) -> Option<usize> {
            self.decls.iter().position(|d| d.flag == flag)
        }

        pub(crate) fn decl_at(&self, index: usize) -> &OptionDecl {
            &self.decls[index]
        }
    }
}

pub mod args {
    use super::registry::{Handle, OptionValue, RawValue, Registry, ValueKind};
    use std::fmt;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq)]
    struct Occurrence {
        position: usize,
        value: RawValue,
    }

    /// Values matched from one argv, keyed by handle.
    #[derive(Debug, Clone, Default)]
    pub struct Matches {
        slots: Vec<Vec<Occurrence>>,
        rest: Vec<String>,
    }

    impl Matches {
        fn with_slots(len: usize) -> Self {
            Self {
                slots: vec![Vec::new(); len],
                rest: Vec::new(),
            }
        }

        fn push(&mut self, index: usize, position: usize, value: RawValue) {
            self.slots[index].push(Occurrence { position, value });
        }

        fn occurrences<T>(&self, handle: &Handle<T>) -> &[Occurrence] {
            self.slots
                .get(handle.index())
                .map(|v| v.as_slice())
                .unwrap_or(&[])
        }

        /// Value matched for `handle`, if the flag was supplied.
        ///
        /// Scalar options keep the last occurrence; list options concatenate all
        /// occurrences in argv order.
        pub fn get<T: OptionValue>(&self, handle: &Handle<T>) -> Option<T> {
            let occurrences = self.occurrences(handle);
            let last = occurrences.last()?;
            if !T::KIND.is_list() {
                return T::from_raw(&last.value);
            }
            let combined = match &last.value {
                RawValue::StringList(_) => RawValue::StringList(
                    occurrences
                        .iter()
                        .filter_map(|o| match &o.value {
                            RawValue::StringList(v) => Some(v.iter().cloned()),
                            _ => None,
                        })
                        .flatten()
                        .collect(),
                ),
                RawValue::PathList(_) => RawValue::PathList(
                    occurrences
                        .iter()
                        .filter_map(|o| match &o.value {
                            RawValue::PathList(v) => Some(v.iter().cloned()),
                            _ => None,
                        })
                        .flatten()
                        .collect(),
                ),
                other => other.clone(),
            };
            T::from_raw(&combined)
        }

        /// Concatenate the values of several list handles in argv order.
        ///
        /// Returns `None` only when none of the handles matched.
        pub fn get_merged<T>(&self, handles: &[&Handle<Vec<T>>]) -> Option<Vec<T>>
        where
            Vec<T>: OptionValue,
        {
            let mut hits: Vec<&Occurrence> = handles
                .iter()
                .flat_map(|h| self.occurrences(*h).iter())
                .collect();
            if hits.is_empty() {
                return None;
            }
            hits.sort_by_key(|o| o.position);
            let mut out = Vec::new();
            for hit in hits {
                if let Some(mut items) = Vec::<T>::from_raw(&hit.value) {
                    out.append(&mut items);
                }
            }
            Some(out)
        }

        /// Whether the flag behind `handle` appeared in argv.
        pub fn is_present<T>(&self, handle: &Handle<T>) -> bool {
            !self.occurrences(handle).is_empty()
        }

        /// Arguments that are not options, plus everything after `--`.
        pub fn rest(&self) -> &[String] {
            self.rest.as_slice()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ParseError {
        InvalidArgs(String),
    }

    impl ParseError {
        pub fn message(&self) -> &str {
            match self {
                Self::InvalidArgs(msg) => msg.as_str(),
            }
        }
    }

    impl fmt::Display for ParseError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message())
        }
    }

    impl std::error::Error for ParseError {}

    pub type ParseResult<T> = Result<T, ParseError>;

    #[derive(Debug, Clone)]
    pub enum ParseOutcome {
        Matches(Matches),
        Help(String),
    }

    fn split_list(token: &str) -> impl Iterator<Item = String> + '_ {
        token
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn is_option_token(token: &str) -> bool {
        token.starts_with("--")
    }

    fn scalar_value(kind: ValueKind, flag: &str, raw: &str) -> ParseResult<RawValue> {
        match kind {
            ValueKind::String => Ok(RawValue::String(raw.to_string())),
            ValueKind::Path => Ok(RawValue::Path(PathBuf::from(raw))),
            ValueKind::Int => raw.trim().parse::<i64>().map(RawValue::Int).map_err(|_| {
                ParseError::InvalidArgs(format!("invalid value '{raw}' for '{flag}': expected an integer"))
            }),
            ValueKind::Bool | ValueKind::StringList | ValueKind::PathList => {
                unreachable!("scalar_value called for {kind:?}")
            }
        }
    }

    fn list_value(kind: ValueKind, items: Vec<String>) -> RawValue {
        match kind {
            ValueKind::PathList => RawValue::PathList(items.into_iter().map(PathBuf::from).collect()),
            _ => RawValue::StringList(items),
        }
    }

    impl Registry {
        /// Match `argv` against the declared options.
        ///
        /// - `--flag value` and `--flag=value`; a separate value never starts
        ///   with `--`
        /// - list options consume tokens up to the next `--` option; each token
        ///   is split on commas, and repeated occurrences accumulate
        /// - `-h/--help` (unless declared) => `ParseOutcome::Help`
        /// - parsing stops at `--`
        pub fn parse(&self, argv: &[String]) -> ParseResult<ParseOutcome> {
            let help_declared = self.lookup("--help").is_some();
            let mut m = Matches::with_slots(self.len());

            let mut i = 0usize;
            let mut after_separator = false;
            while i < argv.len() {
                let arg = argv[i].as_str();

                if after_separator {
                    m.rest.push(arg.to_string());
                    i += 1;
                    continue;
                }
                if arg == "--" {
                    after_separator = true;
                    i += 1;
                    continue;
                }
                if !help_declared && (arg == "--help" || arg == "-h") {
                    return Ok(ParseOutcome::Help(crate::help::render(self)));
                }
                if !arg.starts_with('-') || arg == "-" {
                    m.rest.push(arg.to_string());
                    i += 1;
                    continue;
                }

                let (flag, inline) = match arg.split_once('=') {
                    Some((flag, value)) => (flag, Some(value)),
                    None => (arg, None),
                };
                let Some(index) = self.lookup(flag) else {
                    return Err(ParseError::InvalidArgs(format!("unknown flag: {flag}")));
                };
                let kind = self.decl_at(index).kind();
                let position = i;

                if !kind.takes_value() {
                    if inline.is_some() {
                        return Err(ParseError::InvalidArgs(format!(
                            "flag does not take a value: {flag}"
                        )));
                    }
                    m.push(index, position, RawValue::Bool(true));
                    i += 1;
                    continue;
                }

                if kind.is_list() {
                    let mut items: Vec<String> = Vec::new();
                    i += 1;
                    if let Some(value) = inline {
                        items.extend(split_list(value));
                    } else {
                        while i < argv.len() && !is_option_token(&argv[i]) {
                            items.extend(split_list(&argv[i]));
                            i += 1;
                        }
                    }
                    if items.is_empty() {
                        return Err(ParseError::InvalidArgs(format!("missing value for {flag}")));
                    }
                    m.push(index, position, list_value(kind, items));
                    continue;
                }

                let raw = match inline {
                    Some(value) => {
                        i += 1;
                        value
                    }
                    None => {
                        let Some(value) = argv.get(i + 1).filter(|v| !is_option_token(v.as_str())) else {
                            return Err(ParseError::InvalidArgs(format!(
                                "missing value for {flag}"
                            )));
                        };
                        i += 2;
                        value.as_str()
                    }
                };
                m.push(index, position, scalar_value(kind, flag, raw)?);
            }

            Ok(ParseOutcome::Matches(m))
        }
    }
}

pub mod help {
    use super::registry::{Completion, OptionDecl, Registry};

    fn format_help(decl: &OptionDecl) -> String {
        let mut out = decl.usage().trim().to_string();
        if let Some(Completion::Values(values)) = decl.completion() {
            let names: Vec<&str> = values.iter().map(|(v, _)| v.as_str()).collect();
            if !names.is_empty() {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&format!("[possible values: {}]", names.join(", ")));
            }
        }
        out
    }

    /// Render a help message from the registry's declarations.
    pub fn render(registry: &Registry) -> String {
        let mut out = String::new();
        if registry.summary().trim().is_empty() {
            out.push_str(registry.name());
            out.push('\n');
        } else {
            out.push_str(&format!(
                "{} - {}\n",
                registry.name(),
                registry.summary().trim()
            ));
        }
        out.push_str(&format!("\nUsage: {} [OPTIONS]\n", registry.name()));

        let mut rows: Vec<(String, String)> = registry
            .iter()
            .map(|d| (d.synopsis(), format_help(d)))
            .collect();
        if !registry.iter().any(|d| d.flag() == "--help") {
            rows.push(("-h, --help".to_string(), "Show help information".to_string()));
        }

        out.push_str("\nOptions:\n");
        let width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {}\n", left));
            } else {
                out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::args::{ParseError, ParseOutcome};
    use super::registry::{Completion, Registry, RegistryError, ValueKind};
    use std::path::PathBuf;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn matches(registry: &Registry, items: &[&str]) -> super::args::Matches {
        match registry.parse(&argv(items)).unwrap() {
            ParseOutcome::Matches(m) => m,
            ParseOutcome::Help(text) => panic!("unexpected help:\n{text}"),
        }
    }

    #[test]
    fn add_rejects_duplicate_flag() {
        let mut registry = Registry::new("cmd");
        registry.add::<bool>("--verbose", "Verbose", None).unwrap();
        let err = registry.add::<bool>("verbose", "Again", None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateFlag {
                flag: "--verbose".to_string()
            }
        );
    }

    #[test]
    fn add_derives_kind_from_type() {
        let mut registry = Registry::new("cmd");
        let count = registry.add::<i64>("--count", "Count", None).unwrap();
        let outputs = registry
            .add::<Vec<PathBuf>>("--outputs", "Outputs", Some(Completion::Filename))
            .unwrap();
        assert_eq!(registry.decl(&count).kind(), ValueKind::Int);
        assert_eq!(registry.decl(&outputs).kind(), ValueKind::PathList);
        assert_eq!(registry.decl(&outputs).completion(), Some(&Completion::Filename));
        assert_eq!(registry.decl(&count).synopsis(), "--count <int>");
    }

    #[test]
    fn parse_reads_scalars_in_both_spellings() {
        let mut registry = Registry::new("cmd");
        let project = registry.add::<PathBuf>("--project", "", None).unwrap();
        let count = registry.add::<i64>("--count", "", None).unwrap();
        let quiet = registry.add::<bool>("--quiet", "", None).unwrap();

        let m = matches(&registry, &["--project", "App.xcodeproj", "--count=-3"]);
        assert_eq!(m.get(&project), Some(PathBuf::from("App.xcodeproj")));
        assert_eq!(m.get(&count), Some(-3));
        assert_eq!(m.get(&quiet), None);
        assert!(!m.is_present(&quiet));
    }

    #[test]
    fn parse_lists_consume_up_to_next_option_and_split_commas() {
        let mut registry = Registry::new("cmd");
        let targets = registry.add::<Vec<String>>("--targets", "", None).unwrap();
        let verbose = registry.add::<bool>("--verbose", "", None).unwrap();

        let m = matches(&registry, &["--targets", "A,B", "C", "--verbose"]);
        assert_eq!(
            m.get(&targets),
            Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
        );
        assert_eq!(m.get(&verbose), Some(true));
    }

    #[test]
    fn get_merged_follows_argv_order() {
        let mut registry = Registry::new("cmd");
        let targets = registry.add::<Vec<String>>("--targets", "", None).unwrap();
        let target = registry.add::<Vec<String>>("--target", "", None).unwrap();

        let m = matches(
            &registry,
            &["--target", "A", "--target", "B", "--targets", "C,D"],
        );
        assert_eq!(
            m.get_merged(&[&targets, &target]),
            Some(vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string()
            ])
        );
        assert_eq!(m.get(&target), Some(vec!["A".to_string(), "B".to_string()]));

        let empty = matches(&registry, &[]);
        assert_eq!(empty.get_merged(&[&targets, &target]), None);
    }

    #[test]
    fn parse_rejects_unknown_and_valueless_flags() {
        let mut registry = Registry::new("cmd");
        registry.add::<String>("--destination", "", None).unwrap();
        registry.add::<bool>("--quiet", "", None).unwrap();

        let err = registry.parse(&argv(&["--nope"])).unwrap_err();
        assert_eq!(err, ParseError::InvalidArgs("unknown flag: --nope".to_string()));

        let err = registry.parse(&argv(&["--destination"])).unwrap_err();
        assert!(err.message().contains("missing value"));

        let err = registry.parse(&argv(&["--quiet=yes"])).unwrap_err();
        assert!(err.message().contains("does not take a value"));
    }

    #[test]
    fn parse_rejects_flag_as_scalar_value() {
        let mut registry = Registry::new("cmd");
        registry.add::<String>("--destination", "", None).unwrap();
        let count = registry.add::<i64>("--count", "", None).unwrap();
        registry.add::<bool>("--asynchronous", "", None).unwrap();

        let err = registry
            .parse(&argv(&["--destination", "--asynchronous"]))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidArgs("missing value for --destination".to_string())
        );

        let m = matches(&registry, &["--count", "-4"]);
        assert_eq!(m.get(&count), Some(-4));
    }

    #[test]
    fn parse_rejects_non_integer_count() {
        let mut registry = Registry::new("cmd");
        registry.add::<i64>("--count", "", None).unwrap();
        let err = registry.parse(&argv(&["--count", "ten"])).unwrap_err();
        assert!(err.message().contains("expected an integer"));
    }

    #[test]
    fn parse_stops_at_separator() {
        let mut registry = Registry::new("cmd");
        let quiet = registry.add::<bool>("--quiet", "", None).unwrap();
        let m = matches(&registry, &["file", "--", "--quiet"]);
        assert!(!m.is_present(&quiet));
        assert_eq!(m.rest(), &["file".to_string(), "--quiet".to_string()]);
    }

    #[test]
    fn help_lists_options_and_completion_values() {
        let mut registry = Registry::new("mockgen generate").with_summary("Generate mocks");
        registry
            .add::<String>(
                "--condition",
                "Compilation condition.",
                Some(Completion::values(&[("DEBUG", "Debug"), ("TEST", "Test")])),
            )
            .unwrap();

        let outcome = registry.parse(&argv(&["--help"])).unwrap();
        let ParseOutcome::Help(text) = outcome else {
            panic!("expected Help");
        };
        assert!(text.contains("mockgen generate - Generate mocks"));
        assert!(text.contains("--condition <value>"));
        assert!(text.contains("[possible values: DEBUG, TEST]"));
        assert!(text.contains("--help"));
    }
}
