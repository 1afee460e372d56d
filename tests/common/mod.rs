#![allow(dead_code)]

pub use framediff_test_utils::builders;
pub use framediff_test_utils::fake_tool;
pub use framediff_test_utils::{init_tracing, with_timeout};
