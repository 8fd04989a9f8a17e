use crate::{error::PackError, Action, Animation, Component, Element, Pack, Part};

/// Every action must start inside the animation.
pub fn check_start_frames(actions: &[Action], frame_number: i32) -> Result<(), PackError> {
    actions
        .iter()
        .enumerate()
        .try_for_each(|(action, &Action { start_frame, .. })| {
            if start_frame < 0 || start_frame as i32 >= frame_number {
                return Err(PackError::StartFrameOutOfRange {
                    action,
                    start_frame,
                    frame_number,
                });
            }

            Ok(())
        })
}

/// Component ids are unique within one animation.
pub fn check_component_ids(components: &[Component]) -> Result<(), PackError> {
    components
        .iter()
        .enumerate()
        .try_for_each(|(index, component)| {
            if components[..index]
                .iter()
                .any(|earlier| earlier.id == component.id)
            {
                return Err(PackError::DuplicateComponent { id: component.id });
            }

            Ok(())
        })
}

/// The part must name exactly one component.
pub fn check_component_ref(part: &Part, components: &[Component]) -> Result<(), PackError> {
    let component_id = part.component_id as i32;
    let matches = components
        .iter()
        .filter(|component| component.id == component_id)
        .count();

    if matches != 1 {
        return Err(PackError::UnknownComponent {
            component_id,
            matches,
        });
    }

    Ok(())
}

impl Pack<'_> {
    /// Resolves every record reachable from the sprite pack and checks the
    /// cross-record invariants. Stops at the first problem.
    pub fn validate(&self) -> Result<(), PackError> {
        for index in 0..self.len() {
            let (tag, element) = self.lookup(index)?;

            log::debug!("validating element {index} ({tag:?})");

            match element {
                Element::Animation(animation) => self.validate_animation(&animation)?,
                Element::Polygon(polygon) => {
                    for poly in &polygon.polys {
                        self.poly_vertices(poly)?;
                    }
                }
                // fully checked by lookup
                Element::Picture(_) | Element::Label(_) | Element::Panel(_) | Element::Matrix(_) => {}
            }
        }

        Ok(())
    }

    pub fn validate_animation(&self, animation: &Animation) -> Result<(), PackError> {
        for component in &animation.components {
            self.string(component.name)?;
        }

        check_component_ids(&animation.components)?;

        let actions = self.actions(animation)?;

        for action in &actions {
            self.string(action.name)?;
        }

        check_start_frames(&actions, animation.header.frame_number)?;

        for frame in self.frames(animation)? {
            for part in self.parts(&frame)? {
                self.matrix(part.t.mat)?;
                check_component_ref(&part, &animation.components)?;
            }
        }

        Ok(())
    }
}
