pub(super) mod run;
pub(super) mod schema;
pub(super) mod send;
pub(super) mod status;
