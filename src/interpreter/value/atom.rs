use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Atoms produced by the runtime itself rather than user source.
pub const NIL: &str = "nil";
pub const OK: &str = "ok";
pub const ERROR: &str = "error";
pub const CONT: &str = "cont";
pub const HALT: &str = "halt";
pub const SOME: &str = "some";
pub const NONE: &str = "none";

thread_local! {
    static ATOMS: RefCell<HashMap<String, Rc<str>>> = RefCell::new(seed());
}

fn seed() -> HashMap<String, Rc<str>> {
    [NIL, OK, ERROR, CONT, HALT, SOME, NONE].iter()
                                            .map(|name| ((*name).to_string(), Rc::from(*name)))
                                            .collect()
}

/// Returns the canonical interned handle for `name`, creating it on first
/// use. Interpretation is single-threaded; the table lives with the thread.
#[must_use]
pub fn intern(name: &str) -> Rc<str> {
    ATOMS.with(|atoms| {
             let mut atoms = atoms.borrow_mut();
             if let Some(existing) = atoms.get(name) {
                 return Rc::clone(existing);
             }
             let atom: Rc<str> = Rc::from(name);
             atoms.insert(name.to_string(), Rc::clone(&atom));
             atom
         })
}
