mod opportunity;
mod snapshot;

pub use {
    opportunity::*,
    snapshot::*,
};
