//! Integration tests for type graph queries over the fixture hierarchy.
//!
//! Covers parent/child linkage, descendant enumeration order, name
//! lookup through the graph, and the typed class/struct views.

use rift_reflect::prelude::*;
use rift_reflect::TypeKey;
use rift_test_utils::{fixture_reflection, Car, CarWheel, Transform, Truck, TruckWheel, Vehicle};

fn names<'a>(types: impl IntoIterator<Item = Type<'a>>) -> Vec<&'a str> {
    types.into_iter().map(|ty| ty.name()).collect()
}

// ---------- Linkage ----------

/// Car declared with parent Vehicle: Car is a child of Vehicle, Vehicle
/// finds Car by name, and Car sees the inherited properties.
#[test]
fn car_is_registered_under_vehicle() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let car = reflection.find::<Car>().unwrap();

    assert!(car.is_child_of(&vehicle));
    assert!(!vehicle.is_child_of(&car));
    assert!(!car.is_child_of(&car));
    assert_eq!(vehicle.find_child("Car"), Some(car));
    assert_eq!(car.parent(), Some(vehicle));

    let mut all = PropertyMap::new();
    car.all_properties(&mut all);
    assert!(all.contains_key("speed"));
    assert!(all.contains_key("bEnabled"));
    assert_eq!(all["bEnabled"].display_name(), "enabled");
}

#[test]
fn parents_precede_children_in_registration_order() {
    let reflection = fixture_reflection();
    for ty in reflection.iter() {
        if let Some(parent) = ty.parent() {
            assert!(parent.id() < ty.id(), "{} registered before {}", ty.name(), parent.name());
        }
    }
}

#[test]
fn roots_are_parentless_types() {
    let reflection = fixture_reflection();
    assert_eq!(names(reflection.roots()), ["Vehicle", "Transform"]);
}

#[test]
fn is_child_of_is_transitive() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let truck = reflection.find::<Truck>().unwrap();
    let wheel = reflection.find::<TruckWheel>().unwrap();
    let car = reflection.find::<Car>().unwrap();

    assert!(wheel.is_child_of(&truck));
    assert!(wheel.is_child_of(&vehicle));
    assert!(!wheel.is_child_of(&car));
}

// ---------- Descendants ----------

#[test]
fn direct_children_follow_registration_order() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    assert_eq!(vehicle.children().len(), 2);
    assert_eq!(names(vehicle.children()), ["Car", "Truck"]);
}

#[test]
fn all_children_lists_siblings_before_grandchildren() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let mut out = Vec::new();
    vehicle.all_children(&mut out);

    let car_wheel = reflection.find::<CarWheel>().unwrap();
    let truck_wheel = reflection.find::<TruckWheel>().unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(names(out[..2].iter().copied()), ["Car", "Truck"]);
    assert_eq!(out[2], car_wheel);
    assert_eq!(out[3], truck_wheel);
}

#[test]
fn all_children_appends_to_existing_output() {
    let reflection = fixture_reflection();
    let transform = reflection.find::<Transform>().unwrap();
    let truck = reflection.find::<Truck>().unwrap();
    let mut out = vec![transform];
    truck.all_children(&mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], transform);
}

// ---------- Name lookup ----------

/// Two branches each hold a type named "Wheel"; the search returns the
/// one found first in depth-first, registration order.
#[test]
fn find_child_picks_first_wheel_depth_first() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let truck = reflection.find::<Truck>().unwrap();

    let first = vehicle.find_child("Wheel").unwrap();
    assert_eq!(first, reflection.find::<CarWheel>().unwrap());
    assert_eq!(first.parent().unwrap().name(), "Car");

    // Searching from the other branch finds its own wheel.
    let truck_wheel = truck.find_child("Wheel").unwrap();
    assert_eq!(truck_wheel, reflection.find::<TruckWheel>().unwrap());
    assert_ne!(first.key(), truck_wheel.key());

    for _ in 0..8 {
        assert_eq!(vehicle.find_child("Wheel"), Some(first));
    }
}

#[test]
fn find_child_misses() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let car = reflection.find::<Car>().unwrap();

    assert_eq!(vehicle.find_child(""), None);
    assert_eq!(vehicle.find_child("Boat"), None);
    assert_eq!(vehicle.find_child("Vehicle"), None);
    assert_eq!(car.find_child("Truck"), None);
}

#[test]
fn find_by_name_returns_first_registered() {
    let reflection = fixture_reflection();
    let wheel = reflection.find_by_name("Wheel").unwrap();
    assert_eq!(wheel, reflection.find::<CarWheel>().unwrap());
    assert!(reflection.find_by_name("Boat").is_none());
}

// ---------- Views ----------

#[test]
fn kinds_and_tags_are_recorded() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let transform = reflection.find::<Transform>().unwrap();

    assert_eq!(vehicle.kind(), TypeKind::Class);
    assert!(vehicle.is_abstract());
    assert_eq!(transform.kind(), TypeKind::Struct);
    assert!(!transform.is_abstract());

    assert!(vehicle.as_class().is_some());
    assert!(vehicle.as_struct().is_none());
    assert!(transform.as_struct().is_some());
    assert!(transform.as_class().is_none());
}

#[test]
fn class_view_navigates_classes() {
    let reflection = fixture_reflection();
    let car = reflection.find::<Car>().unwrap().as_class().unwrap();
    let vehicle = car.parent().unwrap();
    assert_eq!(vehicle.name(), "Vehicle");
    assert!(vehicle.parent().is_none());

    let mut classes = Vec::new();
    vehicle.all_children(&mut classes);
    assert_eq!(classes.len(), 4);
    assert!(classes[0].is_a(&car));
    assert!(!classes[1].is_a(&car));

    let wheel = vehicle.find_child("Wheel").unwrap();
    assert!(wheel.is_child_of(&car));
}

#[test]
fn keys_render_declaration_site() {
    let reflection = fixture_reflection();
    let car = reflection.find::<Car>().unwrap();
    let key: &TypeKey = car.key();
    assert_eq!(key.name(), "Car");
    assert!(key.file().ends_with("fixtures.rs"));
    assert!(!key.file().contains('\\'));
    assert!(key.to_string().starts_with("Car:"));
    assert_eq!(reflection.find_type(key), Some(car.id()));
}

#[test]
fn type_of_resolves_dynamic_type() {
    let reflection = fixture_reflection();
    let car = Car::default();
    let as_instance: &dyn Instance = &car;
    assert_eq!(reflection.type_of(as_instance).unwrap().name(), "Car");
    assert_eq!(as_instance.declaration().name, "Car");
}
