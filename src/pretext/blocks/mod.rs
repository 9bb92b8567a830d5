//! Block emitters.
//!
//! Each emitter is an `impl Converter` method that takes one source block and
//! returns its complete PreTeXt rendering, indented for `ctx.level`.

mod container;
mod figure;
mod list;
mod paragraph;
mod table;
