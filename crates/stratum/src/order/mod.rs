//! Node ordering / crossing minimization.
//!
//! Layers start from a deterministic initial order, then alternate barycenter sweeps (down on
//! even iterations, up on odd ones) with adjacent-swap transposition. The best layering seen is
//! kept; the loop stops once `max_stalls` iterations in a row fail to improve it.

mod barycenter;
pub use barycenter::{NO_NEIGHBOURS, Sweep, barycenter, barycenter_sweep};

mod cross_count;
pub use cross_count::{cross_count, two_layer_cross_count};

mod init_order;
pub use init_order::init_order;

mod transpose;
pub use transpose::transpose;

mod ordering;
pub use ordering::{OrderOptions, order};
