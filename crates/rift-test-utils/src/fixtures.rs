//! The vehicle hierarchy.

use rift_reflect::prelude::*;

/// Abstract root class.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vehicle {
    pub speed: f32,
    pub name: String,
}

impl Reflect for Vehicle {
    type Parent = NoParent;
    const DECLARATION: Declaration = declaration!("Vehicle");
    const KIND: TypeKind = TypeKind::Class;
    const TAGS: TypeTags = TypeTags::ABSTRACT;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("speed", field!(Vehicle, speed: f32), PropertyTags::DETAILS_EDIT);
        builder.add_property("name", field!(Vehicle, name: String), PropertyTags::DETAILS_VIEW);
    }
}

/// Plain data struct embedded in [`Car`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
}

impl Reflect for Transform {
    type Parent = NoParent;
    const DECLARATION: Declaration = declaration!("Transform");

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("x", field!(Transform, x: f32), PropertyTags::DETAILS_EDIT);
        builder.add_property("y", field!(Transform, y: f32), PropertyTags::DETAILS_EDIT);
    }
}

#[derive(Default)]
pub struct Car {
    pub vehicle: Vehicle,
    pub b_enabled: bool,
    pub doors: u8,
    pub transform: Transform,
    pub owner: Option<Owner>,
}

impl Extends<Vehicle> for Car {
    fn base(&self) -> &Vehicle {
        &self.vehicle
    }

    fn base_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }
}

impl Reflect for Car {
    type Parent = Vehicle;
    const DECLARATION: Declaration = declaration!("Car");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("bEnabled", field!(Car, b_enabled: bool), PropertyTags::DETAILS_EDIT);
        builder.add_property("doors", field!(Car, doors: u8), PropertyTags::empty());
        builder.add_property("transform", field!(Car, transform: Transform), PropertyTags::empty());
    }

    fn factory() -> Option<Factory> {
        Some(instantiate::<Self>)
    }
}

impl Construct for Car {
    fn construct(owner: Option<Owner>) -> Self {
        Self {
            vehicle: Vehicle {
                speed: 0.0,
                name: "car".to_owned(),
            },
            b_enabled: true,
            doors: 4,
            owner,
            ..Self::default()
        }
    }
}

/// Redeclares `speed` on top of the inherited one.
#[derive(Default)]
pub struct Truck {
    pub vehicle: Vehicle,
    pub payload: f32,
    pub rated_speed: f32,
    pub owner: Option<Owner>,
}

impl Extends<Vehicle> for Truck {
    fn base(&self) -> &Vehicle {
        &self.vehicle
    }

    fn base_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }
}

impl Reflect for Truck {
    type Parent = Vehicle;
    const DECLARATION: Declaration = declaration!("Truck");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("payload", field!(Truck, payload: f32), PropertyTags::empty());
        builder.add_property("speed", field!(Truck, rated_speed: f32), PropertyTags::DETAILS_VIEW);
    }

    fn factory() -> Option<Factory> {
        Some(instantiate::<Self>)
    }
}

impl Construct for Truck {
    fn construct(owner: Option<Owner>) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }
}

/// Reflected as `Wheel`, under [`Car`].
#[derive(Default)]
pub struct CarWheel {
    pub car: Car,
    pub radius: f32,
}

impl Extends<Car> for CarWheel {
    fn base(&self) -> &Car {
        &self.car
    }

    fn base_mut(&mut self) -> &mut Car {
        &mut self.car
    }
}

impl Reflect for CarWheel {
    type Parent = Car;
    const DECLARATION: Declaration = declaration!("Wheel");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("radius", field!(CarWheel, radius: f32), PropertyTags::empty());
    }
}

/// Reflected as `Wheel`, under [`Truck`].
#[derive(Default)]
pub struct TruckWheel {
    pub truck: Truck,
    pub radius: f32,
}

impl Extends<Truck> for TruckWheel {
    fn base(&self) -> &Truck {
        &self.truck
    }

    fn base_mut(&mut self) -> &mut Truck {
        &mut self.truck
    }
}

impl Reflect for TruckWheel {
    type Parent = Truck;
    const DECLARATION: Declaration = declaration!("Wheel");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("radius", field!(TruckWheel, radius: f32), PropertyTags::empty());
    }
}

/// Register every fixture type, in a fixed order.
///
/// Resulting ids: Vehicle 0, Car 1, Truck 2, CarWheel 3, TruckWheel 4,
/// Transform 5.
pub fn register_fixtures(ctx: &mut ReflectionContext) {
    ctx.register::<Car>();
    ctx.register::<Truck>();
    ctx.register::<CarWheel>();
    ctx.register::<TruckWheel>();
    ctx.register::<Transform>();
}

/// A finalized reflection holding the fixtures.
pub fn fixture_reflection() -> Reflection {
    let mut ctx = ReflectionContext::new();
    register_fixtures(&mut ctx);
    ctx.finalize()
}
