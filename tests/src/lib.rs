mod convert;
mod merge;
mod support;
