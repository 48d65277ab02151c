// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! # srcview
//!
//! srcview is a crate for displaying source coverage: given the source files of a project and,
//! for each file, a list of covered and not-covered text ranges, it renders every file with the
//! covered and not-covered spans told apart, alongside a navigable tree of the files grouped by
//! directory. It does not compute coverage, it only renders coverage that was already computed.
//!
//! Its job is split into two independent parts: annotating source text with ranges, and
//! building a tree out of the report's file paths. A coordinating `Viewer` glues the two
//! together for a host.
//!
//! ## Annotator
//!
//! A `SourceRange` is a span of text with independent start and end lines and columns, all
//! 1-based, tagged covered or not. An `Annotator` maps the ranges starting on a line onto exact
//! substrings of that line, producing a `RenderedLine`: a line label followed by `Plain`,
//! `Covered` and `NotCovered` segments. A range spanning several lines renders every line it
//! touches, and reports how many lines it consumed so the caller can resume after it.
//!
//! ```text
//!  ranges starting on line 2                 rendered lines
//!
//! ┌─────────────────────┐        ┌────┬──────────────┬──────────────┐
//! │ 2:13-4:7 not-covered│ ─────► │  2 │ "    let x = "│ "foo("       │
//! └─────────────────────┘        ├────┼──────────────┼──────────────┤
//!                                │  3 │ "        "    │ "1,"         │
//!                                ├────┼──────────────┼──────────────┤
//!                                │  4 │ "    "        │ ");"         │
//!                                └────┴──────────────┴──────────────┘
//!                                 label    plain        not-covered
//! ```
//!
//! Concatenating the segments of a line (without its label) always gives back the source line.
//! Coverage data comes from instrumentation that is sometimes imprecise, so malformed ranges do
//! not fail: columns are clamped to the line and a range starting at column 0 leaves its line
//! unstyled.
//!
//! ## PathTree
//!
//! A `PathTree` turns a flat list of paths into a forest of directory and file nodes. Each
//! node is keyed by its full prefix (e.g. `src/lib`), and the prefix lookup is what resolves a
//! node's parent, so repeated segment names (`src/lib/src/lib.rs`) cannot be confused.
//!
//! ```text
//!  src/main.c          ┌─────┐      ┌────────┐
//!  src/util/a.c  ────► │ src ├──┬──►│ main.c │
//!  lib/b.c             └─────┘  │   └────────┘
//!                               │   ┌──────┐     ┌─────┐
//!                               └──►│ util ├────►│ a.c │
//!                                   └──────┘     └─────┘
//!                      ┌─────┐      ┌─────┐
//!                      │ lib ├─────►│ b.c │
//!                      └─────┘      └─────┘
//! ```
//!
//! The tree carries no presentation state. Which nodes are expanded or selected lives in a
//! `TreeViewState`, keyed by node key and rebuilt along with the tree.
//!
mod annotate;
mod config;
mod model;
mod pathtree;
mod percent;
mod range;
mod segment;
mod source;
pub mod term;
mod treestate;
pub mod viewer;

pub use annotate::{Annotated, Annotator};
pub use config::ViewerConfig;
pub use model::{CoverageModel, CoverageReport, FileCoverage};
pub use pathtree::{NodeId, PathNode, PathTree, Walk};
pub use percent::{coverage_title, format_percent, percent};
pub use range::SourceRange;
pub use segment::{RenderedDocument, RenderedLine, Style, StyledSegment};
pub use source::{FsSourceReader, SourceError, SourceReader};
pub use treestate::TreeViewState;
pub use viewer::Viewer;
