//! IDE-facing surface — the test-fixture harness and the inline
//! expected-highlighting markup it understands.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: markup rendering and parsing take data in,
//!    return data out
//! 2. **Scoped state**: a [`CheckerFixture`] is created fresh per test
//!    case and torn down when dropped — never a shared singleton
//!
//! ## Usage
//!
//! ```ignore
//! use packvis::ide::CheckerFixture;
//!
//! let mut fixture = CheckerFixture::new();
//! fixture.add_class("public class MyConstants {}")?;
//! fixture.configure_by_text(
//!     "test.java",
//!     "package p;\nimport <error descr=\"Class 'MyConstants' is in \
//!      the default package\">MyConstants</error>;\n",
//! )?;
//! fixture.check_highlighting()?;
//! ```

mod fixture;
mod markup;

pub use fixture::{CheckerFixture, FixtureError};
pub use markup::{ExpectedDiagnostic, MarkupError, parse_markup, render_markup};
