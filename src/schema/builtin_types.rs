// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined standard message types.
//!
//! These are the definitions almost every recorded message depends on:
//!
//! - `builtin_interfaces/msg/Time` and `Duration` (`int32 sec`, `uint32 nanosec`)
//! - `std_msgs/msg/Header` and the `std_msgs` primitive wrappers
//! - the core `geometry_msgs` vector, point, quaternion and pose types
//!
//! Header is stored without the legacy `seq` member. The packed codec and
//! the legacy digest add it back where the legacy wire format needs it.

use crate::schema::ast::{BaseType, FieldDescriptor, MessageDefinition, TypeMap};

/// Full name of the time type.
pub const TIME: &str = "builtin_interfaces/msg/Time";
/// Full name of the duration type.
pub const DURATION: &str = "builtin_interfaces/msg/Duration";
/// Full name of the standard header type.
pub const HEADER: &str = "std_msgs/msg/Header";

fn base(b: BaseType) -> FieldDescriptor {
    FieldDescriptor::base(b)
}

fn named(name: &str) -> FieldDescriptor {
    FieldDescriptor::named(name)
}

fn sec_nanosec() -> MessageDefinition {
    MessageDefinition::new()
        .field("sec", base(BaseType::Int32))
        .field("nanosec", base(BaseType::UInt32))
}

fn header() -> MessageDefinition {
    MessageDefinition::new()
        .field("stamp", named(TIME))
        .field("frame_id", base(BaseType::String))
}

fn data(b: BaseType) -> MessageDefinition {
    MessageDefinition::new().field("data", base(b))
}

fn xyz(b: BaseType) -> MessageDefinition {
    MessageDefinition::new()
        .field("x", base(b))
        .field("y", base(b))
        .field("z", base(b))
}

fn std_msgs(types: &mut TypeMap) {
    types.insert(HEADER.to_string(), header());
    types.insert("std_msgs/msg/Empty".to_string(), MessageDefinition::new());

    let wrappers = [
        ("Bool", BaseType::Bool),
        ("Byte", BaseType::Octet),
        ("Char", BaseType::UInt8),
        ("Int8", BaseType::Int8),
        ("Int16", BaseType::Int16),
        ("Int32", BaseType::Int32),
        ("Int64", BaseType::Int64),
        ("UInt8", BaseType::UInt8),
        ("UInt16", BaseType::UInt16),
        ("UInt32", BaseType::UInt32),
        ("UInt64", BaseType::UInt64),
        ("Float32", BaseType::Float32),
        ("Float64", BaseType::Float64),
        ("String", BaseType::String),
    ];
    for (name, b) in wrappers {
        types.insert(format!("std_msgs/msg/{name}"), data(b));
    }

    types.insert(
        "std_msgs/msg/ColorRGBA".to_string(),
        MessageDefinition::new()
            .field("r", base(BaseType::Float32))
            .field("g", base(BaseType::Float32))
            .field("b", base(BaseType::Float32))
            .field("a", base(BaseType::Float32)),
    );
    types.insert(
        "std_msgs/msg/MultiArrayDimension".to_string(),
        MessageDefinition::new()
            .field("label", base(BaseType::String))
            .field("size", base(BaseType::UInt32))
            .field("stride", base(BaseType::UInt32)),
    );
    types.insert(
        "std_msgs/msg/MultiArrayLayout".to_string(),
        MessageDefinition::new()
            .field(
                "dim",
                FieldDescriptor::sequence(named("std_msgs/msg/MultiArrayDimension"), 0),
            )
            .field("data_offset", base(BaseType::UInt32)),
    );
}

fn geometry_msgs(types: &mut TypeMap) {
    types.insert("geometry_msgs/msg/Point".to_string(), xyz(BaseType::Float64));
    types.insert("geometry_msgs/msg/Point32".to_string(), xyz(BaseType::Float32));
    types.insert("geometry_msgs/msg/Vector3".to_string(), xyz(BaseType::Float64));
    types.insert(
        "geometry_msgs/msg/Quaternion".to_string(),
        xyz(BaseType::Float64).field("w", base(BaseType::Float64)),
    );
    types.insert(
        "geometry_msgs/msg/Pose".to_string(),
        MessageDefinition::new()
            .field("position", named("geometry_msgs/msg/Point"))
            .field("orientation", named("geometry_msgs/msg/Quaternion")),
    );
    types.insert(
        "geometry_msgs/msg/PoseStamped".to_string(),
        MessageDefinition::new()
            .field("header", named(HEADER))
            .field("pose", named("geometry_msgs/msg/Pose")),
    );
    types.insert(
        "geometry_msgs/msg/Transform".to_string(),
        MessageDefinition::new()
            .field("translation", named("geometry_msgs/msg/Vector3"))
            .field("rotation", named("geometry_msgs/msg/Quaternion")),
    );
    types.insert(
        "geometry_msgs/msg/Twist".to_string(),
        MessageDefinition::new()
            .field("linear", named("geometry_msgs/msg/Vector3"))
            .field("angular", named("geometry_msgs/msg/Vector3")),
    );
}

/// Get all predefined standard message types.
pub fn get_all() -> TypeMap {
    let mut types = TypeMap::new();
    types.insert(TIME.to_string(), sec_nanosec());
    types.insert(DURATION.to_string(), sec_nanosec());
    std_msgs(&mut types);
    geometry_msgs(&mut types);
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_structure() {
        let all = get_all();
        let time = &all[TIME];
        assert_eq!(time.fields.len(), 2);
        assert_eq!(time.fields[0].name, "sec");
        assert_eq!(time.fields[1].descriptor, base(BaseType::UInt32));
        assert_eq!(all[DURATION], *time);
    }

    #[test]
    fn test_header_has_no_seq() {
        let all = get_all();
        let header = &all[HEADER];
        assert_eq!(header.fields.len(), 2);
        assert!(header.get_field("seq").is_none());
        assert_eq!(header.fields[0].descriptor, named(TIME));
    }

    #[test]
    fn test_every_reference_is_defined() {
        let all = get_all();
        for (name, def) in &all {
            for dep in def.dependencies() {
                assert!(all.contains_key(dep), "{name} references missing {dep}");
            }
        }
    }

    #[test]
    fn test_names_use_three_segments() {
        for name in get_all().keys() {
            assert_eq!(name.split('/').count(), 3, "{name}");
        }
    }
}
