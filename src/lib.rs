// SPDX-License-Identifier: Apache-2.0
mod cfg;
mod error;

pub mod figure;
pub mod layout;
pub mod sample;
pub mod select;
pub mod stats;

pub use cfg::Cfg;
pub use cfg::Mode;
pub use error::Error;
pub use sample::read_samples;
pub use sample::Sample;
pub use select::select;
pub use select::Series;
pub use stats::Summary;
