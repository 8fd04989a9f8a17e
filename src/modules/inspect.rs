use std::path::{Path, PathBuf};

use spritepack::{Animation, Element, Offset, Pack, PackFile, ParticleConfig};

use crate::err;

pub struct InspectOptions {
    /// Run full validation before printing
    validate: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { validate: true }
    }
}

#[derive(Default)]
pub struct Inspect {
    pack_file: Option<PathBuf>,
    particle_configs: Vec<Offset>,
    options: InspectOptions,
}

impl Inspect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pack_file(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.pack_file = Some(path.into());

        self
    }

    /// Particle configs are not pack elements so they can only be found by offset.
    pub fn particle_config(&mut self, offset: Offset) -> &mut Self {
        self.particle_configs.push(offset);

        self
    }

    pub fn validate(&mut self, v: bool) -> &mut Self {
        self.options.validate = v;

        self
    }

    fn load(&self) -> eyre::Result<PackFile> {
        let Some(path) = self.pack_file.as_ref() else {
            return err!("pack_file is not set");
        };

        if !path.is_file() {
            return err!("pack file `{}` does not exist", path.display());
        }

        Ok(PackFile::open_from_file(path)?)
    }

    /// Opens and validates without printing anything.
    pub fn check(&self) -> eyre::Result<()> {
        let file = self.load()?;
        let pack = file.pack()?;

        pack.validate()?;

        log::info!("pack is valid ({} elements)", pack.len());

        Ok(())
    }

    pub fn run(&self) -> eyre::Result<String> {
        let file = self.load()?;
        let pack = file.pack()?;

        if self.options.validate {
            pack.validate()?;
        }

        let mut report = describe_pack(&pack)?;

        for &offset in &self.particle_configs {
            let config = pack.particle_config(offset)?;
            report += &describe_particle_config(offset, &config);
        }

        Ok(report)
    }
}

pub fn describe_pack(pack: &Pack) -> eyre::Result<String> {
    let header = pack.header();
    let [tex0, tex1] = pack.textures();

    let mut report = format!(
        "pack v{} ({} bytes), {} elements, textures [{tex0}, {tex1}]\n",
        header.version,
        pack.blob().len(),
        pack.len()
    );

    for index in 0..pack.len() {
        let (tag, element) = pack.lookup(index)?;
        let offset = pack.data_offset(index)?;

        report += &format!("#{index} {tag:?} at {offset:#x}: ");

        report += &match element {
            Element::Picture(picture) => format!("{} quads\n", picture.quads.len()),
            Element::Polygon(polygon) => {
                let vertices: Vec<String> = polygon
                    .polys
                    .iter()
                    .map(|poly| poly.n.to_string())
                    .collect();

                format!(
                    "{} polys, vertices [{}]\n",
                    polygon.polys.len(),
                    vertices.join(", ")
                )
            }
            Element::Animation(animation) => describe_animation(pack, &animation)?,
            Element::Label(label) => format!(
                "{}x{} color {:#010x} align {} size {}\n",
                label.width, label.height, label.color, label.align, label.size
            ),
            Element::Panel(panel) => format!(
                "{}x{} scissor {}\n",
                panel.width, panel.height, panel.scissor
            ),
            Element::Matrix(matrix) => format!("{:?}\n", matrix.m),
        };
    }

    Ok(report)
}

fn describe_animation(pack: &Pack, animation: &Animation) -> eyre::Result<String> {
    let header = &animation.header;

    let mut report = format!(
        "{} frames, {} actions, {} components\n",
        header.frame_number, header.action_number, header.component_number
    );

    for component in &animation.components {
        let name = pack.string(component.name)?.unwrap_or("<anonymous>");
        report += &format!("    component {} `{name}`\n", component.id);
    }

    for action in pack.actions(animation)? {
        let name = pack.string(action.name)?.unwrap_or("<default>");
        report += &format!(
            "    action `{name}` frames {}..{}\n",
            action.start_frame,
            action.start_frame as i32 + action.number as i32
        );
    }

    Ok(report)
}

fn describe_particle_config(offset: Offset, config: &ParticleConfig) -> String {
    format!(
        "particle config at {offset:#x}: {:?}, {} particles, {}/s, life {} ± {}\n",
        config.mode, config.total_particles, config.emission_rate, config.life, config.life_var
    )
}
