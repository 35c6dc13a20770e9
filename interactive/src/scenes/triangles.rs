use cgmath::{Matrix4, SquareMatrix, Vector2};
use rand::rngs::SmallRng;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::{GlRenderer, Primitive};

use classroom::input::{Key, KeyState};
use classroom::triangles::{
    TriangleSpawner, VertexCollector, VertexSpace, FIXED_COLOR, FIXED_TRIANGLES, UNIT_TRIANGLE,
};
use classroom::Color;

use crate::draw::Painter;
use crate::scenes::{Scene, SceneContext, SceneError};

const PENDING_COLOR: Color = Color::new(1.0, 1.0, 1.0);

fn ndc_program() -> Result<Program, SceneError> {
    let program = ProgramBuilder::new(
        include_str!("../gl_shaders/ndc.glsl"),
        include_str!("../gl_shaders/color.glsl"),
    )
    .build()?;

    Ok(program)
}

pub struct FixedTriangles {
    program: Program,
    geometry: Geometry,
}

impl FixedTriangles {
    pub fn new() -> Result<Self, SceneError> {
        let data: Vec<f32> = FIXED_TRIANGLES.iter().flatten().copied().collect();

        let geometry = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec2)
            .build()?;
        let program = ndc_program()?;
        program.set_vec4("input_color", FIXED_COLOR.rgba(1.0));

        Ok(Self { program, geometry })
    }
}

impl Scene for FixedTriangles {
    fn draw(&mut self, renderer: &mut GlRenderer) {
        renderer.draw(&self.geometry, &self.program, Primitive::Triangles);
    }
}

pub struct Spawn {
    painter: Painter,
    triangle: Geometry,
    spawner: TriangleSpawner,
    rng: SmallRng,
}

impl Spawn {
    pub fn new(ctx: SceneContext) -> Result<Self, SceneError> {
        let triangle = GeometryBuilder::new(&UNIT_TRIANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            triangle,
            spawner: TriangleSpawner::new(ctx.config.spawn.size),
            rng: ctx.rng,
        })
    }
}

impl Scene for Spawn {
    fn key(&mut self, key: Key, state: KeyState) {
        if key == Key::C && state == KeyState::Pressed {
            self.spawner.clear();
            log::info!("triangles cleared");
        }
    }

    fn click(&mut self, position: Vector2<f32>) {
        self.spawner.spawn(position, &mut self.rng);
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        for triangle in self.spawner.triangles() {
            self.painter.fill(
                renderer,
                &self.triangle,
                &self.spawner.model(triangle),
                triangle.color,
                Primitive::Triangles,
            );
        }
    }
}

pub struct Clicks {
    painter: Painter,
    ndc: Program,
    collector: VertexCollector,
    triangles: Vec<(Geometry, Color)>,
    pending: Option<Geometry>,
    rng: SmallRng,
}

impl Clicks {
    pub fn new(ctx: SceneContext, space: VertexSpace) -> Result<Self, SceneError> {
        log::info!("storing clicked vertices in {space:?} space");

        Ok(Self {
            painter: Painter::new(ctx.screen)?,
            ndc: ndc_program()?,
            collector: VertexCollector::new(space, ctx.screen),
            triangles: Vec::new(),
            pending: None,
            rng: ctx.rng,
        })
    }

    fn fill(&self, renderer: &mut GlRenderer, geometry: &Geometry, color: Color, primitive: Primitive) {
        match self.collector.space() {
            VertexSpace::Screen => self.painter.fill(
                renderer,
                geometry,
                &Matrix4::identity(),
                color,
                primitive,
            ),
            VertexSpace::Ndc => {
                self.ndc.set_vec4("input_color", color.rgba(1.0));
                renderer.draw(geometry, &self.ndc, primitive);
            }
        }
    }

    fn rebuild_pending(&mut self) -> Result<(), SceneError> {
        let data: Vec<f32> = self
            .collector
            .pending()
            .iter()
            .flat_map(|v| [v.x, v.y])
            .collect();

        self.pending = if data.is_empty() {
            None
        } else {
            Some(
                GeometryBuilder::new(&data)
                    .with_attribute(VertexAttribute::Vec2)
                    .build()?,
            )
        };

        Ok(())
    }

    fn add_click(&mut self, position: Vector2<f32>) -> Result<(), SceneError> {
        if let Some(triangle) = self.collector.click(position, &mut self.rng) {
            let geometry = GeometryBuilder::new(&triangle.flat())
                .with_attribute(VertexAttribute::Vec3)
                .build()?;
            self.triangles.push((geometry, triangle.color));
        }

        self.rebuild_pending()
    }
}

impl Scene for Clicks {
    fn click(&mut self, position: Vector2<f32>) {
        if let Err(e) = self.add_click(position) {
            log::error!("could not build triangle geometry: {e}");
        }
    }

    fn draw(&mut self, renderer: &mut GlRenderer) {
        for (geometry, color) in &self.triangles {
            self.fill(renderer, geometry, *color, Primitive::Triangles);
        }

        if let Some(pending) = &self.pending {
            renderer.set_point_size(8.0);
            self.fill(renderer, pending, PENDING_COLOR, Primitive::Points);
        }
    }

    fn clear_color(&self) -> [f32; 3] {
        [0.0, 0.0, 0.0]
    }
}
