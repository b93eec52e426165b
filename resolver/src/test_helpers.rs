use std::cell::RefCell;
use std::rc::Rc;

use crate::{Signature, SymbolKey, SymbolKind};

#[ctor::ctor]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A log shared between callbacks and the test that observes them.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(vec![]))
}

pub fn type_key(name: &str) -> SymbolKey {
    SymbolKey::of_type(name)
}

pub fn field_key(owner: &str, name: &str) -> SymbolKey {
    SymbolKey::member(owner, name, SymbolKind::Field)
}

pub fn method_key(owner: &str, name: &str, parameters: &[&str]) -> SymbolKey {
    SymbolKey::callable(owner, name, SymbolKind::Method, Signature::of(parameters))
}
