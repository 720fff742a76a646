//! The Record & Tuple laboratory catalogue.
//!
//! Facts are the behaviours of today's JavaScript that frame the questions;
//! tweakables are the open design questions of the proposal. Each decision id
//! is the JavaScript snippet whose result is being decided.

mod concerns;

use crate::accessor::Accessor;
use crate::catalogue::Catalogue;
use crate::decision::Decision;
use crate::error::ValidationError;

/// `Object.is(#[-0].at(0), -0)`: can a tuple store negative zero?
pub const STORE_NEGATIVE_ZERO: &str = "Object.is(#[-0].at(0), -0)";
pub const ZEROS_TRIPLE_EQUAL: &str = "#[+0] === #[-0]";
pub const NAN_TUPLES_TRIPLE_EQUAL: &str = "#[NaN] === #[NaN]";
pub const ZEROS_OBJECT_IS: &str = "Object.is(#[+0], #[-0])";
pub const NAN_TUPLES_OBJECT_IS: &str = "Object.is(#[NaN], #[NaN])";
pub const TYPEOF_BOX: &str = "typeof Box";
pub const TYPEOF_TUPLE: &str = "typeof #[]";
pub const TYPEOF_TUPLE_WITH_BOX: &str = "typeof #[Box({})]";
pub const BOX_PRIMITIVE_THROWS: &str = "Box(42) // throws?";
pub const OBJECT_WRAPPER_IS_TUPLE: &str = "Object(#[]) === #[]";
pub const WEAK_SET_TUPLE_THROWS: &str = "new WeakSet().add(#[]) // throws?";
pub const WEAK_SET_BOXED_TUPLE_THROWS: &str = "new WeakSet().add(#[Box({})]) // throws?";
pub const PROXY_TUPLE_THROWS: &str = "new Proxy(#[]) // throws?";
pub const PROXY_BOXED_TUPLE_THROWS: &str = "new Proxy(#[Box({})]) // throws?";

/// Unavailable whenever Box does not exist.
fn no_box(a: &Accessor<'_>) -> Option<String> {
    a.equals(TYPEOF_BOX, "undefined")
        .then(|| "typeof Box === 'undefined'".to_string())
}

fn facts() -> Vec<Decision> {
    vec![
        Decision::fact("typeof []", "object"),
        Decision::fact("typeof NaN", "number"),
        Decision::fact("+0 === -0", true),
        Decision::fact("Object.is(+0, -0)", false),
        Decision::fact("[-0].includes(+0)", true),
        Decision::fact("NaN === NaN", false),
        Decision::fact("Object.is(NaN, NaN)", true),
        Decision::fact("[NaN].includes(NaN)", true),
        Decision::fact("[0] === [0]", false),
        Decision::fact("#[0] === #[0]", true),
    ]
}

fn equality() -> Result<Vec<Decision>, ValidationError> {
    Ok(vec![
        Decision::tweakable(STORE_NEGATIVE_ZERO, [true, false], true)?
            .with_concern(|own, _| (!own.is_true()).then(concerns::no_negative_zero)),
        Decision::tweakable(ZEROS_TRIPLE_EQUAL, [true, false], true)?.with_concern(|own, a| {
            let stores_negative_zero = a.is_true(STORE_NEGATIVE_ZERO);
            if own.is_true() {
                stores_negative_zero.then(concerns::can_not_always_intern)
            } else if !stores_negative_zero {
                Some(concerns::impossible_equality_of_zeros())
            } else {
                Some(concerns::zeros_not_triple_equal())
            }
        }),
        Decision::tweakable(NAN_TUPLES_TRIPLE_EQUAL, [true, false], true)?
            .with_concern(|own, _| (!own.is_true()).then(concerns::unequal_tuple_nan)),
        Decision::tweakable(ZEROS_OBJECT_IS, [false, true], false)?.with_concern(|own, a| {
            if own.is_true() {
                return a
                    .is_true(STORE_NEGATIVE_ZERO)
                    .then(concerns::observable_different_but_is_equal);
            }
            if !a.is_true(STORE_NEGATIVE_ZERO) {
                return Some(concerns::impossible_equality_of_zeros());
            }
            (a.equals(TYPEOF_TUPLE, "object") && a.is_true(ZEROS_TRIPLE_EQUAL))
                .then(concerns::difference_between_equality_for_typeof_object)
        }),
        Decision::tweakable(NAN_TUPLES_OBJECT_IS, [true, false], true)?.with_concern(|own, a| {
            (!own.is_true() && a.is_true(NAN_TUPLES_TRIPLE_EQUAL)).then(concerns::nan_not_is_nan)
        }),
    ])
}

fn typeof_and_box() -> Result<Vec<Decision>, ValidationError> {
    Ok(vec![
        Decision::tweakable(TYPEOF_BOX, ["box", "object", "undefined"], "undefined")?.with_concern(
            |own, a| {
                if no_box(a).is_some() {
                    return Some(concerns::without_box());
                }
                (!own.is_text("object")).then(concerns::typeof_powerful_object_is_not_object)
            },
        ),
        Decision::tweakable(TYPEOF_TUPLE, ["tuple", "object"], "tuple")?.with_concern(|_, a| {
            if no_box(a).is_some() {
                return None;
            }
            (!a.same(TYPEOF_TUPLE, TYPEOF_TUPLE_WITH_BOX)).then(concerns::slot_sensitive_typeof)
        }),
        Decision::tweakable(TYPEOF_TUPLE_WITH_BOX, ["tuple", "object"], "tuple")?
            .with_availability(no_box)
            .with_concern(|own, a| {
                if a.equals(TYPEOF_TUPLE, "object") && own.is_text("tuple") {
                    return Some(concerns::confusing_typeof());
                }
                (!own.is_text("object")).then(concerns::typeof_powerful_object_is_not_object)
            }),
        Decision::tweakable(BOX_PRIMITIVE_THROWS, [true, false], true)?
            .with_availability(no_box)
            .with_concern(|own, _| {
                if own.is_true() {
                    Some(concerns::no_primitives_in_box())
                } else {
                    Some(concerns::storing_primitive_in_box())
                }
            }),
    ])
}

fn objects_and_weak_references() -> Result<Vec<Decision>, ValidationError> {
    Ok(vec![
        Decision::tweakable(OBJECT_WRAPPER_IS_TUPLE, [true, false], true)?.with_concern(|own, a| {
            if !own.is_true() {
                return Some(concerns::object_wrappers());
            }
            (!a.equals(TYPEOF_TUPLE, "object")).then(concerns::object_wrapper_inconsistency)
        }),
        Decision::tweakable(WEAK_SET_TUPLE_THROWS, [true, false], true)?.with_concern(|own, a| {
            if !own.is_true() {
                return Some(concerns::weak_set_leak());
            }
            a.equals(TYPEOF_BOX, "object").then(concerns::valid_weak_value)
        }),
        Decision::tweakable(WEAK_SET_BOXED_TUPLE_THROWS, [true, false], true)?
            .with_availability(no_box)
            .with_concern(|own, _| own.is_true().then(concerns::no_boxes_in_weak_sets)),
        Decision::tweakable(PROXY_TUPLE_THROWS, [true, false], true)?.with_concern(|own, a| {
            if !own.is_true() {
                return Some(concerns::record_proxies());
            }
            a.equals(TYPEOF_TUPLE, "object").then(concerns::proxy_throw_typeof_object)
        }),
        Decision::tweakable(PROXY_BOXED_TUPLE_THROWS, [true, false], true)?
            .with_availability(no_box)
            .with_concern(|own, a| {
                if !own.is_true() {
                    return Some(concerns::record_proxies());
                }
                a.equals(TYPEOF_TUPLE_WITH_BOX, "object").then(concerns::proxy_throw_typeof_object)
            }),
    ])
}

/// Build the laboratory catalogue: ten facts followed by fourteen tweakables.
pub fn catalogue() -> Result<Catalogue, ValidationError> {
    let mut decisions = facts();
    decisions.extend(equality()?);
    decisions.extend(typeof_and_box()?);
    decisions.extend(objects_and_weak_references()?);
    Catalogue::new(decisions)
}
