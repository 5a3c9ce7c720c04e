//! Command dispatch: from a free-text command to a parse function.

use std::fmt;
use std::sync::{Arc, LazyLock};

use netscreen_core::{LINE_SEPARATOR, ParseOutput, TableDefinition};
use tracing::debug;

use crate::generic::tokenize;
use crate::vendor::cisco::Cisco;
use crate::vendor::{CommandInfo, CommandParser, VendorModule};

/// Shared dispatcher with the built-in vendor modules.
pub static DEFAULT_DISPATCHER: LazyLock<Arc<Dispatcher>> =
    LazyLock::new(|| Arc::new(Dispatcher::default()));

/// Outcome of dispatching a command.
#[derive(Debug, Clone, Copy)]
pub enum Dispatch {
    /// A vendor module recognized the command.
    Vendor(CommandParser),
    /// Nothing recognized it; whitespace tokenization applies.
    Generic,
}

impl Dispatch {
    /// Runs the selected parser.
    pub fn parse(&self, text: &str, separator: &str) -> Option<ParseOutput> {
        match self {
            Dispatch::Vendor(parser) => parser.parse(text, separator),
            Dispatch::Generic => tokenize(text, separator),
        }
    }

    /// Short human-readable name, e.g. `cisco: show arp` or `generic`.
    pub fn label(&self) -> String {
        match self {
            Dispatch::Vendor(parser) => format!("{}: {}", parser.vendor(), parser.command()),
            Dispatch::Generic => "generic".to_string(),
        }
    }
}

/// Tries each registered vendor module in registration order.
pub struct Dispatcher {
    modules: Vec<Box<dyn VendorModule + Send + Sync>>,
}

impl Default for Dispatcher {
    /// A dispatcher with every built-in vendor module.
    fn default() -> Self {
        Self::empty().with_module(Cisco)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("modules", &self.module_names())
            .finish()
    }
}

impl Dispatcher {
    /// A dispatcher with no vendor modules; everything goes to the generic parser.
    pub fn empty() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Builder form of [`Dispatcher::register`].
    pub fn with_module(mut self, module: impl VendorModule + Send + Sync + 'static) -> Self {
        self.register(module);
        self
    }

    /// Appends a vendor module. Earlier modules take precedence.
    pub fn register(&mut self, module: impl VendorModule + Send + Sync + 'static) {
        self.modules.push(Box::new(module));
    }

    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|module| module.name()).collect()
    }

    /// Selects the parser for `command`.
    pub fn dispatch(&self, command: &str) -> Dispatch {
        for module in &self.modules {
            if let Some(parser) = module.resolve(command) {
                debug!(
                    command,
                    vendor = parser.vendor(),
                    parser = parser.command(),
                    "Dispatched command"
                );
                return Dispatch::Vendor(parser);
            }
        }
        debug!(command, "No vendor parser, using generic tokenizer");
        Dispatch::Generic
    }

    /// Parses `text` (already normalized to `\n`) as the output of `command`.
    pub fn parse(&self, command: &str, text: &str) -> Option<ParseOutput> {
        self.parse_with_separator(command, text, LINE_SEPARATOR)
    }

    /// Like [`Dispatcher::parse`], with an explicit line separator.
    pub fn parse_with_separator(
        &self,
        command: &str,
        text: &str,
        separator: &str,
    ) -> Option<ParseOutput> {
        self.dispatch(command).parse(text, separator)
    }

    /// Every command the registered modules recognize.
    pub fn supported_commands(&self) -> Vec<CommandInfo> {
        self.modules
            .iter()
            .flat_map(|module| module.commands())
            .collect()
    }

    /// Every table definition of the registered modules.
    pub fn tables(&self) -> Vec<(&'static str, TableDefinition)> {
        self.modules
            .iter()
            .flat_map(|module| {
                let vendor = module.name();
                module
                    .tables()
                    .into_iter()
                    .map(move |table| (vendor, table))
            })
            .collect()
    }
}
