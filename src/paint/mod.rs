pub(crate) mod command;
pub(crate) mod painter;
pub(crate) mod queue;
pub(crate) mod ticker;
