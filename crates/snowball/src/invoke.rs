use std::any::Any;
use std::cell::Cell;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// Uniform call contract over every supported target shape.
///
/// `Args` is the argument tuple, so arity and parameter types are checked
/// where the assertion is written rather than at run time.
pub trait Invoke<Args> {
    /// Value produced by one invocation.
    type Output;

    /// Calls the target once with `args`.
    fn invoke(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_invoke_for_fn {
    ($($ty:ident $var:ident),*) => {
        impl<Func, Ret, $($ty),*> Invoke<($($ty,)*)> for Func
        where
            Func: FnMut($($ty),*) -> Ret,
        {
            type Output = Ret;

            fn invoke(&mut self, ($($var,)*): ($($ty,)*)) -> Ret {
                (*self)($($var),*)
            }
        }
    };
}

impl_invoke_for_fn!();
impl_invoke_for_fn!(A a);
impl_invoke_for_fn!(A a, B b);
impl_invoke_for_fn!(A a, B b, C c);
impl_invoke_for_fn!(A a, B b, C c, D d);
impl_invoke_for_fn!(A a, B b, C c, D d, E e);
impl_invoke_for_fn!(A a, B b, C c, D d, E e, F f);
impl_invoke_for_fn!(A a, B b, C c, D d, E e, F f, G g);
impl_invoke_for_fn!(A a, B b, C c, D d, E e, F f, G g, H h);

/// An object paired with a method; the method's return value is the result.
///
/// Methods taking one input are invoked with a one-element tuple, methods
/// taking no input with `()`.
pub struct Bound<'a, O, M> {
    object: &'a mut O,
    method: M,
}

impl<'a, O, M> Bound<'a, O, M> {
    /// Binds `method` to `object`.
    pub fn new(object: &'a mut O, method: M) -> Self {
        Self { object, method }
    }
}

impl<'a, O, M, R> Invoke<()> for Bound<'a, O, M>
where
    M: FnMut(&mut O) -> R,
{
    type Output = R;

    fn invoke(&mut self, (): ()) -> R {
        (self.method)(&mut *self.object)
    }
}

impl<'a, O, M, A, R> Invoke<(A,)> for Bound<'a, O, M>
where
    M: FnMut(&mut O, A) -> R,
{
    type Output = R;

    fn invoke(&mut self, (input,): (A,)) -> R {
        (self.method)(&mut *self.object, input)
    }
}

/// An object, a mutating method, and a getter.
///
/// The method runs for its side effect and its return value is dropped; the
/// getter, called on the same object afterwards, supplies the result.
pub struct BoundWith<'a, O, M, G> {
    object: &'a mut O,
    method: M,
    getter: G,
}

impl<'a, O, M, G> BoundWith<'a, O, M, G> {
    /// Binds `method` and `getter` to `object`.
    pub fn new(object: &'a mut O, method: M, getter: G) -> Self {
        Self {
            object,
            method,
            getter,
        }
    }
}

impl<'a, O, M, G, D, R> Invoke<()> for BoundWith<'a, O, M, G>
where
    M: FnMut(&mut O) -> D,
    G: FnMut(&O) -> R,
{
    type Output = R;

    fn invoke(&mut self, (): ()) -> R {
        (self.method)(&mut *self.object);
        (self.getter)(&*self.object)
    }
}

impl<'a, O, M, G, A, D, R> Invoke<(A,)> for BoundWith<'a, O, M, G>
where
    M: FnMut(&mut O, A) -> D,
    G: FnMut(&O) -> R,
{
    type Output = R;

    fn invoke(&mut self, (input,): (A,)) -> R {
        (self.method)(&mut *self.object, input);
        (self.getter)(&*self.object)
    }
}

/// Error raised by an invocation: either an `Err` return or a panic.
pub enum Raised {
    /// The target returned `Err`.
    Error(Box<dyn Error>),
    /// The target panicked; the payload is kept for downcasting.
    Panic(Box<dyn Any + Send>),
}

impl Raised {
    /// Returns whether the raised value is of kind `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }

    /// Returns the raised value as `E` when it is of that kind.
    ///
    /// Panic payloads match when they were raised with
    /// [`std::panic::panic_any`] carrying an `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Raised::Error(err) => err.downcast_ref::<E>(),
            Raised::Panic(payload) => payload.downcast_ref::<E>(),
        }
    }

    /// Human readable message of the raised value.
    pub fn message(&self) -> String {
        match self {
            Raised::Error(err) => err.to_string(),
            Raised::Panic(payload) => {
                if let Some(text) = payload.downcast_ref::<&'static str>() {
                    (*text).to_string()
                } else if let Some(text) = payload.downcast_ref::<String>() {
                    text.clone()
                } else {
                    "non-string panic payload".to_string()
                }
            }
        }
    }
}

impl fmt::Debug for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Raised::Panic(_) => f.debug_tuple("Panic").field(&self.message()).finish(),
        }
    }
}

thread_local! {
    static SILENCED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wraps the process panic hook, once, so that panics on a thread inside
/// [`Attempt::attempt`] print nothing. Other panics reach the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SILENCED.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Invocation that catches panics instead of unwinding through the caller.
///
/// Implemented for every [`Invoke`] target whatever it returns.
pub trait Attempt<Args>: Invoke<Args> {
    /// Invokes the target; a panic comes back as [`Raised::Panic`] without
    /// printing the panic message.
    fn attempt(&mut self, args: Args) -> Result<Self::Output, Raised>;
}

impl<T, Args> Attempt<Args> for T
where
    T: Invoke<Args>,
{
    fn attempt(&mut self, args: Args) -> Result<T::Output, Raised> {
        install_quiet_hook();
        let was_silenced = SILENCED.with(|flag| flag.replace(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.invoke(args)));
        SILENCED.with(|flag| flag.set(was_silenced));
        outcome.map_err(Raised::Panic)
    }
}

/// Return types that report failure as a value.
pub trait Fallible {
    /// Converts the return value into the error it carries, if any.
    fn into_raised(self) -> Option<Raised>;
}

impl<T, E> Fallible for Result<T, E>
where
    E: Into<Box<dyn Error>>,
{
    fn into_raised(self) -> Option<Raised> {
        self.err().map(|err| Raised::Error(err.into()))
    }
}

/// Invocation whose `Err` return counts as raising, as well as a panic.
pub trait AttemptResult<Args> {
    /// Invokes the target and returns what it raised, if anything.
    fn attempt_result(&mut self, args: Args) -> Option<Raised>;
}

impl<T, Args> AttemptResult<Args> for T
where
    T: Invoke<Args>,
    T::Output: Fallible,
{
    fn attempt_result(&mut self, args: Args) -> Option<Raised> {
        match self.attempt(args) {
            Ok(output) => output.into_raised(),
            Err(raised) => Some(raised),
        }
    }
}
