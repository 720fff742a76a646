//! Concern texts of the Record & Tuple laboratory.

use crate::decision::Concern;

const ISSUE_65: &str = "https://github.com/tc39/proposal-record-tuple/issues/65";

pub fn without_box() -> Concern {
    Concern::new(
        "without_box",
        "complexity moved to ecosystem",
        "Using symbols-as-weakmap-keys, symbols in Records and Tuples could still refer to \
         objects or functions in a WeakMap. Code will need to ensure the necessary code has access \
         to these WeakMap side tables, and API conventions will need to be established to \
         distinguish when symbols are being used in this way. If a Map is used by accident there \
         is a risk of memory leaks, and unless direct access to the WeakMap is hidden behind a \
         wrapper, other code could remove or replace the referenced object. Box use-cases \
         include composite keys for Maps and Sets, and passing groups of values (possibly \
         functions) around in React.js without triggering re-renders due to changing object \
         identity.",
    )
    .with_reference("https://github.com/tc39/proposal-symbols-as-weakmap-keys")
}

pub fn typeof_powerful_object_is_not_object() -> Concern {
    Concern::new(
        "typeof_powerful_object_is_not_object",
        "security risk",
        "Existing security sensitive code checks if a value has no power by checking that its \
         typeof is not 'object' or 'function', and assumes values with other results are safe to \
         pass around without further inspection. These projects may not be updated before they \
         start to interact with Records and Tuples.",
    )
}

pub fn valid_weak_value() -> Concern {
    Concern::new(
        "valid_weak_value",
        "consistency change",
        "Current code can rely on values that have typeof 'object' and are not null being \
         storable weakly. If Records and Tuples introduce values that have typeof 'object' but \
         throw when placed in a WeakSet, this consistency is no longer reliable and code will \
         need to be updated.",
    )
}

pub fn weak_set_leak() -> Concern {
    Concern::new(
        "weak_set_leak",
        "memory leak",
        "If values are allowed in a WeakSet that can never be garbage-collected, this could \
         create a silent memory leak.",
    )
}

pub fn slot_sensitive_typeof() -> Concern {
    Concern::new(
        "slot_sensitive_typeof",
        "slot sensitive typeof",
        "If the typeof of a record or tuple changes depending on whether there is a Box \
         transitively within its tree, typeof becomes confusing. Code will have to rely on \
         static methods like Record.isRecord instead.",
    )
}

pub fn confusing_typeof() -> Concern {
    Concern::new(
        "confusing_typeof",
        "problematic typeof",
        "If a Tuple without a Box in its tree has typeof 'object', there is no value to be \
         gained from a Tuple with a Box having typeof 'tuple': if anything it is more like an \
         object when it contains a Box.",
    )
}

pub fn object_wrappers() -> Concern {
    Concern::new(
        "object_wrappers",
        "object wrappers",
        "Having Object wrappers for Record and Tuple adds a hazard to avoid and confusion when \
         using JS.",
    )
}

pub fn object_wrapper_inconsistency() -> Concern {
    Concern::new(
        "object_wrapper_inconsistency",
        "object wrapper consistency",
        "Usually values whose typeof is not 'object' or 'function' have Object wrapper \
         versions of them.",
    )
}

pub fn no_boxes_in_weak_sets() -> Concern {
    Concern::new(
        "no_boxes_in_weak_sets",
        "performance",
        "Libraries may want to create values based on Records that contain Boxes, for example \
         mapping each Box of a Record to something else. If this work is expensive it may be \
         worth memoizing it with a WeakMap, which is not possible if Records with Boxes cannot \
         be WeakMap keys.",
    )
}

pub fn unequal_tuple_nan() -> Concern {
    Concern::new(
        "unequal_tuple_nan",
        "consistency change",
        "Currently the only value not equal to itself is NaN, which makes self-inequality a \
         reliable check for NaN. If any record or tuple containing a NaN within its tree is also \
         not equal to itself, there would be an infinite number of values not equal to \
         themselves.",
    )
    .with_reference(ISSUE_65)
}

pub fn no_negative_zero() -> Concern {
    Concern::new(
        "no_negative_zero",
        "no negative zero",
        "Negative zero can be stored in a standard Array. If negative zero was transformed into \
         positive zero when stored in a tuple, mapping arrays of numbers to and from tuples \
         would not be isomorphic. Being able to store a negative zero is considered important \
         to some users.",
    )
    .with_reference(ISSUE_65)
}

pub fn impossible_equality_of_zeros() -> Concern {
    Concern::new(
        "impossible_equality_of_zeros",
        "impossible equality",
        "If negative zero cannot be stored in a Tuple (it is converted to +0), then #[-0] \
         cannot compare unequal to #[+0].",
    )
}

pub fn observable_different_but_is_equal() -> Concern {
    Concern::new(
        "observable_different_but_is_equal",
        "Object.is semantics",
        "Putting aside that two NaNs can be observably different through a TypedArray, if \
         Object.is returns true for two values they are not observably different, which is what \
         memoization relies on: for a pure function, unchanged inputs mean an unchanged output. \
         React.js for example uses Object.is for change detection. If two Tuples compare equal \
         but are observably different (one holds positive zero and the other negative zero), \
         the semantics of Object.is change along with the use cases it can serve.",
    )
}

pub fn nan_not_is_nan() -> Concern {
    Concern::new(
        "nan_not_is_nan",
        "Object.is NaN semantics",
        "If both 'Object.is(NaN, NaN)' and '#[NaN] === #[NaN]' are true, there does not appear \
         to be a reason for Object.is(#[NaN], #[NaN]) not to be true.",
    )
}

pub fn can_not_always_intern() -> Concern {
    Concern::new(
        "can_not_always_intern",
        "can not always intern",
        "Object interning reduces memory and speeds up certain operations after the initial \
         interning cost. If #[+0] equals #[-0] and negative zero is preserved in tuples, record \
         and tuple equality can not rely solely on interning.",
    )
}

pub fn zeros_not_triple_equal() -> Concern {
    Concern::new(
        "zeros_not_triple_equal",
        "Triple equality semantics",
        "As -0 === +0 on their own, it may surprise people that they are no longer triple equal \
         when compared via a record or tuple. This could lead to bugs.",
    )
    .with_reference(ISSUE_65)
}

pub fn storing_primitive_in_box() -> Concern {
    Concern::new(
        "storing_primitive_in_box",
        "storing primitives in a Box",
        "Here a primitive means a value that can be stored directly in a Record or Tuple: \
         records, tuples, boxes, null, undefined, booleans, numbers, strings, symbols and \
         bigints. Box was introduced so Records and Tuples can explicitly reference values that \
         could not otherwise be stored in them, such as functions. Allowing primitives in a Box \
         is ergonomic for producers but moves complexity to consumers, who can no longer rely on \
         a Box always referencing a non-primitive. Checking whether a Record transitively \
         contains an object (for cycle checks, ShadowRealm boundaries or WeakMap keys) can then \
         no longer be done with a single Box.containsBoxes call; other helpers such as \
         Object.containsObject or Box.containsBoxWithIdentity would be needed, and may be harder \
         to explain. Such helpers can be implemented in user-land by walking the tree.",
    )
    .with_reference("https://github.com/tc39/proposal-record-tuple/issues/238")
    .with_reference("https://github.com/tc39/proposal-record-tuple/issues/231")
}

pub fn no_primitives_in_box() -> Concern {
    Concern::new(
        "no_primitives_in_box",
        "Box construction ergonomics",
        "If the Box constructor throws for values that can be stored directly in a Record or \
         Tuple, such as strings, numbers and booleans, code using Boxes generically must check \
         whether a value can be boxed first or handle the exception. On the other hand, an \
         exception may clarify the purpose of Boxes and make unnecessary boxing impossible.",
    )
}

pub fn record_proxies() -> Concern {
    Concern::new(
        "record_proxies",
        "Record proxies",
        "A Record proxy could not be much different from \
         'new Proxy(Object.freeze({...record}), handler)': if the proxy kept Record semantics, \
         equality checks would need to trigger traps and run arbitrary JS during previously safe \
         operations like '==='. The returned proxy would be an object, not a record, so it could \
         be better to throw and keep this API space open for future ideas.",
    )
}

pub fn proxy_throw_typeof_object() -> Concern {
    Concern::new(
        "proxy_throw_typeof_object",
        "proxy ergonomics",
        "Usually anything with typeof 'object' can be proxied. If records and tuples are typeof \
         'object' but throw when passed to the Proxy constructor, users must convert them to \
         frozen objects before proxying them.",
    )
}

pub fn difference_between_equality_for_typeof_object() -> Concern {
    Concern::new(
        "difference_between_equality_for_typeof_object",
        "different equality of an object-like value",
        "Today, if two values 'a' and 'b' both have typeof 'object', then 'a === b' and \
         'Object.is(a, b)' always agree. With this combination two tuples that differ only in \
         the sign of a zero both have typeof 'object' and are '===' equal, but are not equal \
         when compared by Object.is.",
    )
}
