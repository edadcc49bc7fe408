//! Key lists running out of memory.
//!
//! The tests in here use an allocator that fails on request. No subscriber
//! is installed since formatting log events while allocations fail would
//! abort.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

use domain_keys::sign::{Error, Key, KeyList};

//------------ FailingAlloc --------------------------------------------------

/// An allocator that fails on the current thread while asked to.
struct FailingAlloc;

thread_local! {
    static FAIL: Cell<bool> = const { Cell::new(false) };
}

fn failing() -> bool {
    FAIL.try_with(Cell::get).unwrap_or(false)
}

/// Runs `op` with all allocations on this thread failing.
fn without_memory<R>(op: impl FnOnce() -> R) -> R {
    FAIL.with(|fail| fail.set(true));
    let res = op();
    FAIL.with(|fail| fail.set(false));
    res
}

unsafe impl GlobalAlloc for FailingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if failing() {
            ptr::null_mut()
        } else {
            System.alloc(layout)
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(
        &self,
        ptr: *mut u8,
        layout: Layout,
        new_size: usize,
    ) -> *mut u8 {
        if failing() {
            ptr::null_mut()
        } else {
            System.realloc(ptr, layout, new_size)
        }
    }
}

#[global_allocator]
static ALLOC: FailingAlloc = FailingAlloc;

//------------ Helpers -------------------------------------------------------

fn key(tag: u16) -> Key<'static> {
    let mut key = Key::new();
    key.set_keytag(tag);
    key
}

/// Returns a list with at least `count` keys and no free storage.
fn full_list(count: u16) -> KeyList<'static> {
    let mut list = KeyList::new();
    let mut tag = 0;
    while usize::from(tag) < usize::from(count)
        || list.count() < list.capacity()
    {
        list.push(key(tag)).unwrap();
        tag += 1;
    }
    list
}

//------------ Tests ---------------------------------------------------------

#[test]
fn failed_push_keeps_list() {
    let mut list = full_list(64);
    let count = list.count();
    let extra = key(999);

    let res = without_memory(|| list.push(extra));

    let err = res.unwrap_err();
    assert_eq!(err.kind(), Error::Allocation);
    assert_eq!(err.into_key().keytag(), 999);
    assert_eq!(list.count(), count);
    assert_eq!(list.last().unwrap().keytag(), count as u16 - 1);
}

#[test]
fn pop_survives_failed_compaction() {
    let mut list = full_list(64);
    let capacity = list.capacity();
    while list.count() > capacity / 2 {
        list.pop().unwrap();
    }
    assert_eq!(list.capacity(), capacity);

    let popped = without_memory(|| list.pop());

    let popped = popped.unwrap();
    assert_eq!(popped.keytag(), (capacity / 2 - 1) as u16);
    assert_eq!(list.count(), capacity / 2 - 1);
    assert_eq!(list.capacity(), capacity);
    assert_eq!(list.last().unwrap().keytag(), (capacity / 2 - 2) as u16);

    // With memory back, the next pop compacts.
    list.pop().unwrap();
    assert!(list.capacity() <= list.count() * 2);
    assert_eq!(list.count(), capacity / 2 - 2);
}
