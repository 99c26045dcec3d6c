//! Rift type tree: register a small hierarchy and print what reflection
//! knows about it.
//!
//! Demonstrates:
//!   1. Declaring classes and structs with `Reflect`, `Extends` and `field!`
//!   2. Bootstrapping a `ReflectionContext` and finalizing it
//!   3. Walking the type graph and the inherited property lists
//!   4. Creating an instance through its class and editing it by name
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example type_tree

use rift::prelude::*;

// ─── Declarations ───────────────────────────────────────────────

#[derive(Default)]
struct Entity {
    name: String,
}

impl Reflect for Entity {
    type Parent = NoParent;
    const DECLARATION: Declaration = declaration!("Entity");
    const KIND: TypeKind = TypeKind::Class;
    const TAGS: TypeTags = TypeTags::ABSTRACT;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("name", field!(Entity, name: String), PropertyTags::DETAILS_VIEW);
    }
}

#[derive(Default, Clone, Copy, Debug)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Reflect for Color {
    type Parent = NoParent;
    const DECLARATION: Declaration = declaration!("Color");

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("r", field!(Color, r: u8), PropertyTags::DETAILS_EDIT);
        builder.add_property("g", field!(Color, g: u8), PropertyTags::DETAILS_EDIT);
        builder.add_property("b", field!(Color, b: u8), PropertyTags::DETAILS_EDIT);
    }
}

#[derive(Default)]
struct Light {
    entity: Entity,
    cast_shadows: bool,
    intensity: f32,
    color: Color,
    owner: Option<Owner>,
}

impl Extends<Entity> for Light {
    fn base(&self) -> &Entity {
        &self.entity
    }

    fn base_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

impl Reflect for Light {
    type Parent = Entity;
    const DECLARATION: Declaration = declaration!("Light");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        let tags = PropertyTags::DETAILS_EDIT;
        builder.add_property("bCastShadows", field!(Light, cast_shadows: bool), tags);
        builder.add_property("intensity", field!(Light, intensity: f32), tags);
        builder.add_property("color", field!(Light, color: Color), tags);
    }

    fn factory() -> Option<Factory> {
        Some(instantiate::<Self>)
    }
}

impl Construct for Light {
    fn construct(owner: Option<Owner>) -> Self {
        Self {
            entity: Entity {
                name: "light".to_owned(),
            },
            intensity: 1.0,
            owner,
            ..Self::default()
        }
    }
}

#[derive(Default)]
struct Spotlight {
    light: Light,
    cone_angle: f32,
}

impl Extends<Light> for Spotlight {
    fn base(&self) -> &Light {
        &self.light
    }

    fn base_mut(&mut self) -> &mut Light {
        &mut self.light
    }
}

impl Reflect for Spotlight {
    type Parent = Light;
    const DECLARATION: Declaration = declaration!("Spotlight");
    const KIND: TypeKind = TypeKind::Class;

    fn configure(builder: &mut TypeBuilder<'_, Self>) {
        builder.add_property("coneAngle", field!(Spotlight, cone_angle: f32), PropertyTags::DETAILS_EDIT);
    }
}

// ─── Printing ───────────────────────────────────────────────────

fn print_tree(ty: Type<'_>, depth: usize) {
    let mut own = PropertyMap::new();
    ty.own_properties(&mut own);
    let props: Vec<String> = own
        .values()
        .map(|p| format!("{}: {}", p.display_name(), p.value_kind().name()))
        .collect();
    let marker = if ty.is_abstract() { " (abstract)" } else { "" };
    println!(
        "{:indent$}{} [{:?}]{marker} {{ {} }}",
        "",
        ty.name(),
        ty.kind(),
        props.join(", "),
        indent = depth * 2
    );
    for child in ty.children() {
        print_tree(child, depth + 1);
    }
}

fn main() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = ReflectionContext::new();
    ctx.register::<Spotlight>();
    ctx.register::<Color>();
    let reflection = ctx.finalize();

    println!("types:");
    for root in reflection.roots() {
        print_tree(root, 1);
    }

    let entity = reflection.find_by_name("Entity").unwrap();
    let spotlight = entity.find_child("Spotlight").unwrap();
    let mut all = PropertyMap::new();
    spotlight.all_properties(&mut all);
    println!("\nSpotlight sees {} properties:", all.len());
    for (name, prop) in &all {
        println!("  {name:<14} from {:<8} tags {:?}", prop.owner().name(), prop.tags());
    }

    let light_class = reflection.find::<Light>().unwrap().as_class().unwrap();
    let mut light = light_class.create_instance(None).unwrap();
    all["intensity"].set(light.as_mut(), 4.0f32).unwrap();
    all["bCastShadows"].set(light.as_mut(), true).unwrap();
    if let Err(err) = all["coneAngle"].set(light.as_mut(), 30.0f32) {
        println!("\nrejected: {err}");
    }

    let light = light.into_any().downcast::<Light>().ok().unwrap();
    println!(
        "created '{}' intensity={} shadows={} color={:?} owned={}",
        light.entity.name,
        light.intensity,
        light.cast_shadows,
        light.color,
        light.owner.is_some()
    );
}
