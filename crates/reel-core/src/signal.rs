use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Observable value. Subscribers run on every change, never on a write of
/// an equal value. Subscribers may read the signal but must not write it.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T> {
    value: T,
    subs: Vec<Option<Rc<dyn Fn(&T)>>>,
}

impl<T: PartialEq + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
        })))
    }
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }
    /// Returns `true` if the value changed.
    pub fn set(&self, v: T) -> bool {
        let subs: Vec<Rc<dyn Fn(&T)>> = {
            let mut inner = self.0.borrow_mut();
            if inner.value == v {
                return false;
            }
            inner.value = v;
            inner.subs.iter().flatten().cloned().collect()
        };
        let inner = self.0.borrow();
        for s in subs {
            s(&inner.value);
        }
        true
    }
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        let mut inner = self.0.borrow_mut();
        inner.subs.push(Some(Rc::new(f)));
        inner.subs.len() - 1
    }
    pub fn unsubscribe(&self, id: SubId) {
        if let Some(slot) = self.0.borrow_mut().subs.get_mut(id) {
            *slot = None;
        }
    }
}

pub fn signal<T: PartialEq + 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}
