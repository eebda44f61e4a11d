//! CLI command handlers, one file per command.

mod cat;
mod checksum;
mod completions;
mod fetch;
mod head;
mod ls;
mod manpage;
mod put;
mod repos;

pub use cat::run_cat;
pub use checksum::run_checksum;
pub use completions::run_completions;
pub use fetch::run_fetch;
pub use head::run_head;
pub use ls::run_ls;
pub use manpage::run_manpage;
pub use put::run_put;
pub use repos::run_repos;

#[cfg(test)]
pub use fetch::fetch_to;
#[cfg(test)]
pub use head::format_metadata;
#[cfg(test)]
pub use repos::format_plugin_management;
