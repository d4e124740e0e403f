pub(crate) mod input;
pub(crate) mod options;
pub(crate) mod output;
pub(crate) mod prompt;
