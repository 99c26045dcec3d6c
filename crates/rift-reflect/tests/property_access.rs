//! Integration tests for property enumeration and checked access.
//!
//! Covers declaration order, the override law, display names, access
//! through descendant instances, the error cases of checked access, class
//! instance creation and sharing the finalized reflection across threads.

use std::any::Any;
use std::ptr::NonNull;
use std::sync::Arc;

use rift_reflect::prelude::*;
use rift_test_utils::{fixture_reflection, Car, CarWheel, Transform, Truck, TruckWheel, Vehicle};

fn keys<'a>(map: &PropertyMap<'a>) -> Vec<&'a str> {
    map.keys().copied().collect()
}

// ---------- Enumeration ----------

#[test]
fn own_properties_keep_declaration_order() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let mut own = PropertyMap::new();
    vehicle.own_properties(&mut own);
    assert_eq!(keys(&own), ["speed", "name"]);
    assert_eq!(own["speed"].tags(), PropertyTags::DETAILS_EDIT);
    assert_eq!(own["name"].tags(), PropertyTags::DETAILS_VIEW);
}

#[test]
fn all_properties_lists_root_first() {
    let reflection = fixture_reflection();
    let wheel = reflection.find::<CarWheel>().unwrap();
    let mut all = PropertyMap::new();
    wheel.all_properties(&mut all);
    assert_eq!(
        keys(&all),
        ["speed", "name", "bEnabled", "doors", "transform", "radius"]
    );
    assert_eq!(all["speed"].owner().name(), "Vehicle");
    assert_eq!(all["radius"].owner().name(), "Wheel");
}

/// Truck redeclares `speed`: the descendant's entry wins and keeps the
/// inherited position.
#[test]
fn redeclared_property_overrides_inherited_one() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap();
    let truck = reflection.find::<Truck>().unwrap();

    let mut all = PropertyMap::new();
    truck.all_properties(&mut all);
    assert_eq!(keys(&all), ["speed", "name", "payload"]);

    let speed = all["speed"];
    assert_eq!(speed.owner(), truck);
    assert_ne!(Some(speed), vehicle.find_property("speed"));
    assert_eq!(truck.find_property("speed"), Some(speed));
    assert_eq!(speed.tags(), PropertyTags::DETAILS_VIEW);
}

#[test]
fn find_property_is_local() {
    let reflection = fixture_reflection();
    let car = reflection.find::<Car>().unwrap();
    assert!(car.find_property("doors").is_some());
    assert!(car.find_property("speed").is_none());
    assert!(car.parent().unwrap().find_property("speed").is_some());
}

#[test]
fn display_names_drop_bool_prefix() {
    let reflection = fixture_reflection();
    let car = reflection.find::<Car>().unwrap();
    let enabled = car.find_property("bEnabled").unwrap();
    assert_eq!(enabled.name(), "bEnabled");
    assert_eq!(enabled.display_name(), "enabled");
    let doors = car.find_property("doors").unwrap();
    assert_eq!(doors.display_name(), "doors");
}

#[test]
fn value_kinds_are_declared_types() {
    let reflection = fixture_reflection();
    let car = reflection.find::<Car>().unwrap();
    let transform = car.find_property("transform").unwrap();
    assert!(transform.value_kind().is::<Transform>());
    assert_eq!(transform.value_kind().name(), "Transform");
    assert_eq!(car.find_property("doors").unwrap().value_kind().name(), "u8");
}

// ---------- Checked access ----------

#[test]
fn get_and_set_on_owner_instance() {
    let reflection = fixture_reflection();
    let vehicle_type = reflection.find::<Vehicle>().unwrap();
    let name = vehicle_type.find_property("name").unwrap();

    let mut vehicle = Vehicle::default();
    name.set(&mut vehicle, "bus".to_owned()).unwrap();
    assert_eq!(vehicle.name, "bus");
    name.get_mut::<String>(&mut vehicle).unwrap().push('!');
    assert_eq!(name.get::<String>(&vehicle).unwrap(), "bus!");
}

#[test]
fn inherited_property_reaches_through_descendants() {
    let reflection = fixture_reflection();
    let speed = reflection
        .find::<Vehicle>()
        .unwrap()
        .find_property("speed")
        .unwrap();
    let enabled = reflection
        .find::<Car>()
        .unwrap()
        .find_property("bEnabled")
        .unwrap();

    let mut wheel = CarWheel::default();
    speed.set(&mut wheel, 30.0f32).unwrap();
    enabled.set(&mut wheel, true).unwrap();
    assert_eq!(wheel.car.vehicle.speed, 30.0);
    assert!(wheel.car.b_enabled);
    assert_eq!(speed.get::<f32>(&wheel), Ok(&30.0));
}

#[test]
fn struct_valued_property_is_borrowed_in_place() {
    let reflection = fixture_reflection();
    let transform = reflection
        .find::<Car>()
        .unwrap()
        .find_property("transform")
        .unwrap();
    let x = reflection
        .find::<Transform>()
        .unwrap()
        .find_property("x")
        .unwrap();

    let mut car = Car::default();
    let inner = transform.get_mut::<Transform>(&mut car).unwrap();
    x.set(inner, 2.5f32).unwrap();
    assert_eq!(car.transform, Transform { x: 2.5, y: 0.0 });
}

#[test]
fn overriding_property_reads_descendant_field() {
    let reflection = fixture_reflection();
    let truck_type = reflection.find::<Truck>().unwrap();
    let mut all = PropertyMap::new();
    truck_type.all_properties(&mut all);

    let mut truck = Truck::default();
    all["speed"].set(&mut truck, 80.0f32).unwrap();
    assert_eq!(truck.rated_speed, 80.0);
    assert_eq!(truck.vehicle.speed, 0.0);

    let mut wheel = TruckWheel::default();
    all["speed"].set(&mut wheel, 60.0f32).unwrap();
    assert_eq!(wheel.truck.rated_speed, 60.0);
}

#[test]
fn wrong_value_type_is_rejected() {
    let reflection = fixture_reflection();
    let speed = reflection
        .find::<Vehicle>()
        .unwrap()
        .find_property("speed")
        .unwrap();
    let car = Car::default();
    assert_eq!(
        speed.get::<f64>(&car),
        Err(ReflectError::ValueKindMismatch {
            property: "speed".to_owned(),
            expected: "f32",
            found: "f64",
        })
    );
}

#[test]
fn unrelated_instance_is_rejected() {
    let reflection = fixture_reflection();
    let enabled = reflection
        .find::<Car>()
        .unwrap()
        .find_property("bEnabled")
        .unwrap();
    let mut truck = Truck::default();
    let err = enabled.set(&mut truck, false).unwrap_err();
    assert_eq!(
        err,
        ReflectError::UnrelatedInstance {
            property: "bEnabled".to_owned(),
            owner: "Car".to_owned(),
            instance: "Truck".to_owned(),
        }
    );
    assert_eq!(
        err.to_string(),
        "property 'Car.bEnabled' accessed on unrelated type 'Truck'"
    );
}

struct Stray {
    speed: f32,
}

impl Reflect for Stray {
    type Parent = NoParent;
    const DECLARATION: Declaration = declaration!("Stray");

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("speed", field!(Stray, speed: f32), PropertyTags::empty());
    }
}

#[test]
fn unregistered_instance_is_rejected() {
    let reflection = fixture_reflection();
    let speed = reflection
        .find::<Vehicle>()
        .unwrap()
        .find_property("speed")
        .unwrap();
    let stray = Stray { speed: 1.0 };
    assert!(matches!(
        speed.get::<f32>(&stray),
        Err(ReflectError::UnregisteredInstance { .. })
    ));
    assert!(reflection.type_of(&stray).is_none());
    assert_eq!(stray.speed, 1.0);
}

#[test]
fn raw_accessor_projects_owner_field() {
    let reflection = fixture_reflection();
    let doors = reflection
        .find::<Car>()
        .unwrap()
        .find_property("doors")
        .unwrap();
    let mut car = Car {
        doors: 2,
        ..Car::default()
    };
    let instance = NonNull::from(&mut car).cast::<()>();
    // SAFETY: `instance` points to a live `Car`, the owner of `doors`.
    let field = unsafe { doors.access_raw(instance) }.cast::<u8>();
    // SAFETY: `doors` is declared `u8` and `car` is still borrowed by `instance`.
    unsafe { *field.as_ptr() = 5 };
    assert_eq!(car.doors, 5);
}

/// Hand-written `Instance` that reports an embedded `Transform` as its
/// dynamic value instead of itself.
struct Disguised {
    a: f32,
    b: f32,
    shown: Transform,
}

impl Instance for Disguised {
    fn declaration(&self) -> Declaration {
        Transform::DECLARATION
    }

    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        &self.shown
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.shown
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[test]
fn access_follows_the_value_behind_as_any() {
    let reflection = fixture_reflection();
    let transform = reflection.find::<Transform>().unwrap();
    let x = transform.find_property("x").unwrap();
    let y = transform.find_property("y").unwrap();

    let mut disguised = Disguised {
        a: 7.0,
        b: 8.0,
        shown: Transform { x: 3.0, y: 4.0 },
    };
    assert_eq!(x.get::<f32>(&disguised), Ok(&3.0));
    assert_eq!(y.get::<f32>(&disguised), Ok(&4.0));

    x.set(&mut disguised, 5.0f32).unwrap();
    assert_eq!(disguised.shown, Transform { x: 5.0, y: 4.0 });
    assert_eq!((disguised.a, disguised.b), (7.0, 8.0));
}

// ---------- Instances ----------

#[test]
fn concrete_class_creates_owned_instance() {
    let reflection = fixture_reflection();
    let car_class = reflection.find::<Car>().unwrap().as_class().unwrap();

    let owner: Arc<dyn Instance> = Arc::new(Truck::default());
    let created = car_class
        .create_instance(Some(Arc::downgrade(&owner)))
        .unwrap();
    assert_eq!(reflection.type_of(created.as_ref()), Some(*car_class));

    let car = created.into_any().downcast::<Car>().ok().unwrap();
    assert_eq!(car.doors, 4);
    let parent = car.owner.as_ref().and_then(|o| o.upgrade()).unwrap();
    assert_eq!(reflection.type_of(parent.as_ref()).unwrap().name(), "Truck");
}

#[test]
fn abstract_or_factoryless_classes_create_nothing() {
    let reflection = fixture_reflection();
    let vehicle = reflection.find::<Vehicle>().unwrap().as_class().unwrap();
    let wheel = reflection.find::<CarWheel>().unwrap().as_class().unwrap();
    assert!(vehicle.create_instance(None).is_none());
    assert!(wheel.create_instance(None).is_none());
}

#[test]
fn created_truck_keeps_its_owner() {
    let reflection = fixture_reflection();
    let truck_class = reflection.find::<Truck>().unwrap().as_class().unwrap();

    let owner: Arc<dyn Instance> = Arc::new(Car::default());
    let created = truck_class
        .create_instance(Some(Arc::downgrade(&owner)))
        .unwrap();
    let truck = created.into_any().downcast::<Truck>().ok().unwrap();
    let parent = truck.owner.as_ref().and_then(|o| o.upgrade()).unwrap();
    assert!(Arc::ptr_eq(&parent, &owner));

    drop(owner);
    drop(parent);
    assert!(truck.owner.as_ref().unwrap().upgrade().is_none());
}

#[test]
fn created_instance_is_reflectable() {
    let reflection = fixture_reflection();
    let truck_class = reflection.find::<Truck>().unwrap().as_class().unwrap();
    let mut truck = truck_class.create_instance(None).unwrap();
    let payload = truck_class.find_property("payload").unwrap();
    payload.set(truck.as_mut(), 12.0f32).unwrap();
    assert_eq!(payload.get::<f32>(truck.as_ref()), Ok(&12.0));
}

// ---------- Sharing ----------

#[test]
fn finalized_reflection_is_shared_across_threads() {
    let reflection = Arc::new(fixture_reflection());
    std::thread::scope(|scope| {
        for _ in 0..4 {
            let reflection = Arc::clone(&reflection);
            scope.spawn(move || {
                let vehicle = reflection.find::<Vehicle>().unwrap();
                let wheel = vehicle.find_child("Wheel").unwrap();
                assert_eq!(wheel.parent().unwrap().name(), "Car");
            });
        }
    });
}
