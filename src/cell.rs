use core::{
    cmp::Ordering,
    fmt::Debug,
    hash::Hash,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

use crate::iter::{IntoIter, Iter, IterMut};

/// A cell that provides storage for zero or one value of type `T`. The storage
/// is reserved inline but is only initialized while the cell logically holds a
/// value; the cell runs `T`'s destructor exactly when the value is replaced,
/// reset, or the cell itself is dropped.
///
/// Unlike [`Option`], an `OptCell` never relinquishes its storage while it is
/// alive: extracting the contained value through [`take_unchecked`] or
/// [`take_or`] leaves the cell holding a default "husk" instead of emptying
/// it, so a cell observed valid stays valid across move-outs.
///
/// [`take_unchecked`]: OptCell::take_unchecked
/// [`take_or`]: OptCell::take_or
#[repr(C)]
pub struct OptCell<T> {
    storage: MaybeUninit<T>,
    valid: bool,
}

impl<T> OptCell<T> {
    /// A distinguished empty cell, for spelling out "no value" where a bare
    /// [`empty`] call would read poorly, such as mixed-branch return
    /// expressions. Assigning `EMPTY` over an existing cell drops the old
    /// value, like [`reset`].
    ///
    /// [`empty`]: OptCell::empty
    /// [`reset`]: OptCell::reset
    ///
    /// ## Example
    /// ```
    /// use optcell::OptCell;
    ///
    /// fn checked_halve(n: u32) -> OptCell<u32> {
    ///     if n % 2 == 0 {
    ///         OptCell::new(n / 2)
    ///     } else {
    ///         OptCell::EMPTY
    ///     }
    /// }
    ///
    /// assert_eq!(checked_halve(4).get(), Some(&2));
    /// assert!(!checked_halve(5).is_valid());
    /// ```
    pub const EMPTY: Self = Self::empty();

    /// Construct a new `OptCell` holding no value. The storage is left
    /// uninitialized and no constructor of `T` runs.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell: OptCell<String> = OptCell::empty();
    /// assert!(!cell.is_valid());
    /// ```
    pub const fn empty() -> Self {
        Self {
            storage: MaybeUninit::uninit(),
            valid: false,
        }
    }

    /// Construct a new `OptCell` holding the given value.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell = OptCell::new(42);
    /// assert!(cell.is_valid());
    /// ```
    pub const fn new(value: T) -> Self {
        Self {
            storage: MaybeUninit::new(value),
            valid: true,
        }
    }

    /// Construct a new `OptCell` holding the value produced by `f`. This is
    /// convenient when the value's construction should be tied to the
    /// construction site of the cell.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        Self::new(f())
    }

    /// Construct a new `OptCell` by converting the value held by `other`, if
    /// any. An empty `other` produces an empty cell without constructing a
    /// `T`. The source cell is not modified.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let small = OptCell::new(42u32);
    /// let wide: OptCell<u64> = OptCell::from_cell(&small);
    /// assert_eq!(wide.get(), Some(&42));
    /// assert!(small.is_valid());
    /// ```
    pub fn from_cell<U>(other: &OptCell<U>) -> Self
    where
        U: Clone + Into<T>,
    {
        match other.get() {
            Some(value) => Self::new(value.clone().into()),
            None => Self::empty(),
        }
    }

    /// Construct a new `OptCell` by moving the value out of `other` and
    /// converting it. The source cell *stays valid*: a default value of `U`
    /// takes the place of the moved-out value. An empty `other` produces an
    /// empty cell without constructing a `T`.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut source = OptCell::new(String::from("hello"));
    /// let target: OptCell<String> = OptCell::take_from(&mut source);
    /// assert_eq!(target.get(), Some(&String::from("hello")));
    /// // The source still holds a value, now the default husk.
    /// assert!(source.is_valid());
    /// assert_eq!(source.get(), Some(&String::new()));
    /// ```
    pub fn take_from<U>(other: &mut OptCell<U>) -> Self
    where
        U: Default + Into<T>,
    {
        match other.get_mut() {
            Some(value) => Self::new(mem::take(value).into()),
            None => Self::empty(),
        }
    }

    /// Returns whether the cell currently holds a value.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Get a shared reference to the contained value without checking that one
    /// is present.
    ///
    /// ## Safety
    /// The cell must hold a value, i.e. [`is_valid`] must return `true`.
    /// Calling this method on an empty cell is undefined behavior.
    ///
    /// [`is_valid`]: OptCell::is_valid
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell = OptCell::new(42);
    /// if cell.is_valid() {
    ///     // SAFETY: presence was just checked.
    ///     assert_eq!(unsafe { *cell.get_unchecked() }, 42);
    /// }
    /// ```
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.valid, "accessed an empty OptCell");
        // SAFETY: The caller has ensured that the cell holds a value.
        unsafe { self.storage.assume_init_ref() }
    }

    /// Get a mutable reference to the contained value without checking that
    /// one is present.
    ///
    /// ## Safety
    /// The cell must hold a value, i.e. [`is_valid`] must return `true`.
    /// Calling this method on an empty cell is undefined behavior.
    ///
    /// [`is_valid`]: OptCell::is_valid
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.valid, "accessed an empty OptCell");
        // SAFETY: The caller has ensured that the cell holds a value.
        unsafe { self.storage.assume_init_mut() }
    }

    /// Get a shared reference to the contained value, or `None` if the cell is
    /// empty.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell = OptCell::new(42);
    /// assert_eq!(cell.get(), Some(&42));
    /// assert_eq!(OptCell::<u32>::empty().get(), None);
    /// ```
    pub fn get(&self) -> Option<&T> {
        if self.valid {
            // SAFETY: The validity flag guarantees a live value.
            Some(unsafe { self.storage.assume_init_ref() })
        } else {
            None
        }
    }

    /// Get a mutable reference to the contained value, or `None` if the cell
    /// is empty.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.valid {
            // SAFETY: The validity flag guarantees a live value.
            Some(unsafe { self.storage.assume_init_mut() })
        } else {
            None
        }
    }

    /// Get a shared reference to the contained value, or to `fallback` if the
    /// cell is empty.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell: OptCell<u32> = OptCell::empty();
    /// let fallback = 9;
    /// assert_eq!(*cell.get_or(&fallback), 9);
    /// ```
    pub fn get_or<'a>(&'a self, fallback: &'a T) -> &'a T {
        self.get().unwrap_or(fallback)
    }

    /// Get a mutable reference to the contained value, or to `fallback` if the
    /// cell is empty.
    pub fn get_or_mut<'a>(&'a mut self, fallback: &'a mut T) -> &'a mut T {
        self.get_mut().unwrap_or(fallback)
    }

    /// Get a pointer to the contained value, or a null pointer if the cell is
    /// empty. The returned pointer is valid until the cell is moved, mutated,
    /// or dropped.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell: OptCell<u32> = OptCell::empty();
    /// assert!(cell.as_ptr().is_null());
    /// ```
    pub const fn as_ptr(&self) -> *const T {
        if self.valid {
            self.storage.as_ptr()
        } else {
            ptr::null()
        }
    }

    /// Get a mutable pointer to the contained value, or a null pointer if the
    /// cell is empty. The returned pointer is valid until the cell is moved,
    /// mutated, or dropped.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.valid {
            self.storage.as_mut_ptr()
        } else {
            ptr::null_mut()
        }
    }

    /// Set the contained value. If the cell already holds a value, that value
    /// is dropped first; the new value is then written into the storage. The
    /// old value is never assigned over, even if `T` supports assignment, so
    /// the drop-then-write order is uniform for every `T`.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut cell = OptCell::empty();
    /// cell.set(7);
    /// assert_eq!(cell.get(), Some(&7));
    /// cell.set(8);
    /// assert_eq!(cell.get(), Some(&8));
    /// ```
    pub fn set(&mut self, value: T) {
        self.reset();
        self.storage.write(value);
        self.valid = true;
    }

    /// Set the contained value to the result of `f`, dropping any previously
    /// held value *before* `f` runs. If `f` panics, the cell is left empty.
    pub fn set_with<F>(&mut self, f: F)
    where
        F: FnOnce() -> T,
    {
        self.reset();
        self.storage.write(f());
        self.valid = true;
    }

    /// Drop the contained value, if any, and mark the cell empty. Calling this
    /// on an already-empty cell does nothing.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut cell = OptCell::new(String::from("hello"));
    /// cell.reset();
    /// assert!(!cell.is_valid());
    /// cell.reset(); // no-op
    /// ```
    pub fn reset(&mut self) {
        if self.valid {
            self.valid = false;
            // SAFETY: The flag said the value was live. It is cleared before
            // the drop, so the value is dropped exactly once even if T's
            // destructor panics.
            unsafe { self.storage.assume_init_drop() };
        }
    }

    /// Replace the contained value with `value`, returning the previous value
    /// if the cell held one.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut cell = OptCell::new(1);
    /// assert_eq!(cell.replace(2), Some(1));
    /// assert_eq!(cell.get(), Some(&2));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        if self.valid {
            // SAFETY: The flag guarantees a live value; it is read out exactly
            // once and the new value immediately takes its place.
            let old = unsafe { self.storage.assume_init_read() };
            self.storage.write(value);
            Some(old)
        } else {
            self.storage.write(value);
            self.valid = true;
            None
        }
    }

    /// Consume the cell and return the contained value, if any.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell = OptCell::new(String::from("hello"));
    /// assert_eq!(cell.into_inner(), Some(String::from("hello")));
    /// ```
    pub fn into_inner(self) -> Option<T> {
        // The value is moved out manually, so the cell's own destructor must
        // not run.
        let this = ManuallyDrop::new(self);
        if this.valid {
            // SAFETY: The flag guarantees a live value, and the cell is never
            // dropped, so the value cannot be dropped a second time.
            Some(unsafe { this.storage.assume_init_read() })
        } else {
            None
        }
    }

    /// Consume the cell and transform the contained value, if any.
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let cell = OptCell::new(21);
    /// assert_eq!(cell.map(|n| n * 2).get(), Some(&42));
    /// ```
    pub fn map<U, F>(self, f: F) -> OptCell<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.into_inner() {
            Some(value) => OptCell::new(f(value)),
            None => OptCell::empty(),
        }
    }

    /// Iterate over the contained value by shared reference. The iterator
    /// yields exactly one item if the cell holds a value, and none otherwise.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.get())
    }

    /// Iterate over the contained value by mutable reference. The iterator
    /// yields exactly one item if the cell holds a value, and none otherwise.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.get_mut())
    }
}

impl<T: Default> OptCell<T> {
    /// Move the contained value out of the cell without checking that one is
    /// present. The cell *stays valid*: a default value of `T` takes the place
    /// of the moved-out value, so presence checks done before the move remain
    /// truthful afterwards.
    ///
    /// ## Safety
    /// The cell must hold a value, i.e. [`is_valid`] must return `true`.
    /// Calling this method on an empty cell is undefined behavior.
    ///
    /// [`is_valid`]: OptCell::is_valid
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut cell = OptCell::new(String::from("hello"));
    /// // SAFETY: The cell was just constructed holding a value.
    /// let value = unsafe { cell.take_unchecked() };
    /// assert_eq!(value, "hello");
    /// assert!(cell.is_valid());
    /// assert_eq!(cell.get(), Some(&String::new()));
    /// ```
    pub unsafe fn take_unchecked(&mut self) -> T {
        debug_assert!(self.valid, "moved out of an empty OptCell");
        // The husk is built first; if T::default panics the cell is untouched.
        let husk = T::default();
        // SAFETY: The caller has ensured that the cell holds a value. It is
        // read out exactly once and the husk immediately takes its place, so
        // the validity flag stays truthful.
        unsafe {
            let value = self.storage.assume_init_read();
            self.storage.write(husk);
            value
        }
    }

    /// Move the contained value out of the cell, or return `fallback` if the
    /// cell is empty. As with [`take_unchecked`], a cell that held a value
    /// stays valid, holding a default husk.
    ///
    /// [`take_unchecked`]: OptCell::take_unchecked
    ///
    /// ## Example
    /// ```
    /// # use optcell::OptCell;
    /// let mut cell: OptCell<u32> = OptCell::empty();
    /// assert_eq!(cell.take_or(9), 9);
    ///
    /// cell.set(5);
    /// assert_eq!(cell.take_or(9), 5);
    /// assert!(cell.is_valid());
    /// ```
    pub fn take_or(&mut self, fallback: T) -> T {
        if self.valid {
            // SAFETY: The flag guarantees a live value.
            unsafe { self.take_unchecked() }
        } else {
            fallback
        }
    }
}

// trait implementations

impl<T> Drop for OptCell<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for OptCell<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<T> for OptCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> From<Option<T>> for OptCell<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl<T: Clone> Clone for OptCell<T> {
    fn clone(&self) -> Self {
        match self.get() {
            Some(value) => Self::new(value.clone()),
            None => Self::empty(),
        }
    }
}

impl<T: Debug> Debug for OptCell<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("OptCell").field(value).finish(),
            None => f.debug_tuple("OptCell").field(&"<empty>").finish(),
        }
    }
}

impl<T: PartialEq> PartialEq for OptCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq> Eq for OptCell<T> {}

// empty cells order before holding cells, matching Option
impl<T: PartialOrd> PartialOrd for OptCell<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.get().partial_cmp(&other.get())
    }
}

impl<T: Ord> Ord for OptCell<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(&other.get())
    }
}

impl<T: Hash> Hash for OptCell<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}
