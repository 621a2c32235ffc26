//! STRling - a readable pattern language that compiles to PCRE2 regular
//! expressions.
//!
//! Source text is parsed into an AST, lowered and normalized into an IR, and
//! emitted as a single PCRE2 pattern string. Every failure is a positioned
//! [`ParseError`] with an optional hint.

pub mod compiler;
pub mod config;
pub mod diagnostic;
pub mod emit;

mod error;

pub use strling_core::{Flags, ast, atom, ir};
pub use strling_parser::error::ParseError;

pub use compiler::Compilation;
pub use error::StrlingError;

use log::{debug, info, trace};

use config::AppConfig;
use emit::{Emitter, Pcre2Emitter};

/// Builder that runs patterns through parsing, compilation and emission.
///
/// # Examples
///
/// ```rust
/// use strling::{PatternCompiler, config::AppConfig};
///
/// let source = "%flags i\n(?<word>\\w+) \\k<word>";
///
/// // With custom config
/// let config = AppConfig::default();
/// let compiler = PatternCompiler::new(config);
///
/// // Parse source to flags and AST
/// let (flags, root) = compiler.parse(source)
///     .expect("Failed to parse");
///
/// // Compile and emit
/// let ir = compiler.compile(root);
/// let pattern = compiler.emit(&ir, flags);
/// assert_eq!(pattern, r"(?i)(?<word>\w+) \k<word>");
///
/// // Or do everything at once with the default config
/// let pattern = PatternCompiler::default().compile_str(source)
///     .expect("Failed to compile");
/// ```
#[derive(Debug, Default)]
pub struct PatternCompiler {
    config: AppConfig,
}

impl PatternCompiler {
    /// Create a new pattern compiler with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Default flags and emitter settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this compiler was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source into its flags and a validated AST.
    ///
    /// Configured default flags are merged into the flags the source
    /// declares.
    ///
    /// # Arguments
    ///
    /// * `source` - STRling source, directive header included
    ///
    /// # Errors
    ///
    /// Returns `StrlingError::Parse` for the first syntax or validation error
    /// in the source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strling::PatternCompiler;
    ///
    /// let err = PatternCompiler::default().parse("a(b").unwrap_err();
    /// assert!(err.to_string().contains("Unterminated group"));
    /// ```
    pub fn parse(&self, source: &str) -> Result<(Flags, ast::Node), StrlingError> {
        info!(len = source.len(); "Parsing pattern");

        let (flags, root) = strling_parser::parse(source)?;
        let flags = flags.union(self.config.flags().flags());

        debug!(flags:% = flags; "Pattern parsed successfully");
        trace!(root:?; "Parsed AST");

        Ok((flags, root))
    }

    /// Lower and normalize an AST into IR.
    pub fn compile(&self, root: ast::Node) -> ir::Op {
        compiler::compile(root)
    }

    /// Like [`PatternCompiler::compile`], also reporting the features used.
    pub fn compile_with_metadata(&self, root: ast::Node) -> Compilation {
        compiler::compile_with_metadata(root)
    }

    /// Emit IR as a PCRE2 pattern.
    ///
    /// # Arguments
    ///
    /// * `ir` - Normalized IR, usually from [`PatternCompiler::compile`]
    /// * `flags` - Flags to apply; emitted inline unless disabled in the config
    pub fn emit(&self, ir: &ir::Op, flags: Flags) -> String {
        let emitter = Pcre2Emitter::new(self.config.emitter().inline_flags());
        emitter.emit(ir, flags)
    }

    /// Run the whole pipeline: parse, validate, compile and emit.
    ///
    /// # Errors
    ///
    /// Returns `StrlingError::Parse` if the source does not parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strling::PatternCompiler;
    ///
    /// let pattern = PatternCompiler::default().compile_str("(?=a)+").unwrap();
    /// assert_eq!(pattern, "(?:(?=a))+");
    /// ```
    pub fn compile_str(&self, source: &str) -> Result<String, StrlingError> {
        let (flags, root) = self.parse(source)?;
        let ir = self.compile(root);
        let pattern = self.emit(&ir, flags);

        info!(pattern = pattern.as_str(); "Pattern compiled");
        Ok(pattern)
    }
}
