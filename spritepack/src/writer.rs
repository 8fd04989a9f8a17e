use byte_writer::ByteWriter;

use crate::{
    Action, AnimationHeader, BlobHeader, Component, EmitterMode, Frame, Label, Matrix, Panel,
    ParticleConfig, Part, Poly, Quad, SpritePack, Trans, EMITTER_MODE_AREA_SIZE,
};

pub(crate) trait WriteToWriter {
    /// Returns the offset the record was written at
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize;
}

impl WriteToWriter for BlobHeader {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u8_slice(&self.magic);
        writer.append_u32(self.version);
        writer.append_u32(self.root);

        offset
    }
}

impl WriteToWriter for Matrix {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_i32_slice(&self.m);

        offset
    }
}

impl WriteToWriter for Panel {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let Panel {
            width,
            height,
            scissor,
        } = self;
        let offset = writer.get_offset();

        writer.append_i32(*width);
        writer.append_i32(*height);
        writer.append_i32(*scissor);

        offset
    }
}

impl WriteToWriter for Label {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let Label {
            color,
            width,
            height,
            align,
            size,
            edge,
            space_h,
            space_w,
            auto_scale,
        } = self;
        let offset = writer.get_offset();

        writer.append_u32(*color);
        writer.append_i32(*width);
        writer.append_i32(*height);
        writer.append_i32(*align);
        writer.append_i32(*size);
        writer.append_i32(*edge);
        writer.append_i32(*space_h);
        writer.append_i32(*space_w);
        writer.append_i32(*auto_scale);

        offset
    }
}

impl WriteToWriter for Quad {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let Quad {
            texid,
            texture_coord,
            screen_coord,
        } = self;
        let offset = writer.get_offset();

        writer.append_i32(*texid);
        writer.append_u16_slice(texture_coord);
        writer.append_i32_slice(screen_coord);

        offset
    }
}

impl WriteToWriter for Poly {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let Poly {
            texture_coord,
            screen_coord,
            texid,
            n,
        } = self;
        let offset = writer.get_offset();

        writer.append_u32(*texture_coord);
        writer.append_u32(*screen_coord);
        writer.append_i32(*texid);
        writer.append_i32(*n);

        offset
    }
}

impl WriteToWriter for Trans {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u32(self.mat);
        writer.append_u32(self.color);
        writer.append_u32(self.additive);

        offset
    }
}

impl WriteToWriter for Part {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = self.t.write_to_writer(writer);

        writer.append_i16(self.component_id);
        writer.append_i16(self.touchable);

        offset
    }
}

impl WriteToWriter for Frame {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u32(self.part);
        writer.append_i32(self.n);

        offset
    }
}

impl WriteToWriter for Action {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u32(self.name);
        writer.append_i16(self.number);
        writer.append_i16(self.start_frame);

        offset
    }
}

impl WriteToWriter for Component {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u32(self.name);
        writer.append_i32(self.id);

        offset
    }
}

impl WriteToWriter for AnimationHeader {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let AnimationHeader {
            frame,
            action,
            frame_number,
            action_number,
            component_number,
        } = self;
        let offset = writer.get_offset();

        writer.append_u32(*frame);
        writer.append_u32(*action);
        writer.append_i32(*frame_number);
        writer.append_i32(*action_number);
        writer.append_i32(*component_number);

        offset
    }
}

impl WriteToWriter for SpritePack {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_u32(self.type_);
        writer.append_u32(self.data);
        writer.append_i32(self.n);
        writer.append_i32_slice(&self.tex);

        offset
    }
}

impl WriteToWriter for EmitterMode {
    /// Tag plus the shared mode area, zero filled past the active mode.
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        writer.append_i32(self.tag());

        let area_start = writer.get_offset();

        match self {
            EmitterMode::Gravity(gravity) => {
                writer.append_f32_slice(&gravity.gravity.to_array());
                writer.append_f32(gravity.speed);
                writer.append_f32(gravity.speed_var);
                writer.append_f32(gravity.tangential_accel);
                writer.append_f32(gravity.tangential_accel_var);
                writer.append_f32(gravity.radial_accel);
                writer.append_f32(gravity.radial_accel_var);
                writer.append_u8(gravity.rotation_is_dir as u8);
            }
            EmitterMode::Radius(radius) => {
                writer.append_f32(radius.start_radius);
                writer.append_f32(radius.start_radius_var);
                writer.append_f32(radius.end_radius);
                writer.append_f32(radius.end_radius_var);
                writer.append_f32(radius.rotate_per_second);
                writer.append_f32(radius.rotate_per_second_var);
            }
        }

        let written = writer.get_offset() - area_start;
        writer.append_zeroes(EMITTER_MODE_AREA_SIZE - written);

        offset
    }
}

impl WriteToWriter for ParticleConfig {
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = self.mode.write_to_writer(writer);

        writer.append_i32(self.src_blend);
        writer.append_i32(self.dst_blend);
        writer.append_f32(self.duration);
        writer.append_u32(self.emitter_matrix);
        writer.append_f32_slice(&self.source_position.to_array());
        writer.append_f32_slice(&self.pos_var.to_array());

        writer.append_f32(self.life);
        writer.append_f32(self.life_var);
        writer.append_f32(self.angle);
        writer.append_f32(self.angle_var);
        writer.append_f32(self.start_size);
        writer.append_f32(self.start_size_var);
        writer.append_f32(self.end_size);
        writer.append_f32(self.end_size_var);

        writer.append_f32_slice(&self.start_color.to_array());
        writer.append_f32_slice(&self.start_color_var.to_array());
        writer.append_f32_slice(&self.end_color.to_array());
        writer.append_f32_slice(&self.end_color_var.to_array());

        writer.append_f32(self.start_spin);
        writer.append_f32(self.start_spin_var);
        writer.append_f32(self.end_spin);
        writer.append_f32(self.end_spin_var);
        writer.append_f32(self.emission_rate);
        writer.append_i32(self.total_particles);
        writer.append_i32(self.position_type);

        offset
    }
}

impl<T: WriteToWriter> WriteToWriter for [T] {
    /// Consecutive records, returns where the first one is.
    fn write_to_writer(&self, writer: &mut ByteWriter) -> usize {
        let offset = writer.get_offset();

        self.iter().for_each(|record| {
            record.write_to_writer(writer);
        });

        offset
    }
}
