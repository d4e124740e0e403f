pub(crate) mod backtrack;
