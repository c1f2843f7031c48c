use std::{collections::BTreeMap, fmt};

use crate::{
    body::{BodyState, CharacterBody},
    camera::{FollowCamera, ViewCamera},
    collision::types::Vec2,
    config::LocomotionConfig,
    controller::LocomotionController,
    error::LocomotionError,
};

/// Stable key of a character owned by a [`Director`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One frame of player intent, as polled from whatever input layer sits above.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Stick/keyboard axis; `y` is "forward" relative to the camera.
    pub move_axis: Vec2,
    /// Jump pressed this frame.
    pub jump: bool,
}

/// Owns every controlled character and the camera their input is relative to.
///
/// Iteration order is by id, so a frame is applied deterministically.
pub struct Director<B: CharacterBody = BodyState> {
    characters: BTreeMap<CharacterId, LocomotionController<B>>,
    active_camera: Option<FollowCamera>,
    next_id: u32,
}

impl<B: CharacterBody> Default for Director<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CharacterBody> Director<B> {
    pub fn new() -> Self {
        Self {
            characters: BTreeMap::new(),
            active_camera: None,
            next_id: 1,
        }
    }

    pub fn spawn(&mut self, body: B, config: LocomotionConfig) -> CharacterId {
        let id = CharacterId(self.next_id);
        self.next_id += 1;
        self.characters
            .insert(id, LocomotionController::new(body, config));
        log::info!("spawned character {id}");
        id
    }

    pub fn remove(&mut self, id: CharacterId) -> Result<LocomotionController<B>, LocomotionError> {
        self.characters
            .remove(&id)
            .ok_or(LocomotionError::UnknownCharacter(id))
    }

    pub fn get(&self, id: CharacterId) -> Option<&LocomotionController<B>> {
        self.characters.get(&id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut LocomotionController<B>> {
        self.characters.get_mut(&id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (CharacterId, &mut LocomotionController<B>)> {
        self.characters.iter_mut().map(|(id, c)| (*id, c))
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn set_active_camera(&mut self, camera: Option<FollowCamera>) {
        self.active_camera = camera;
    }

    pub fn active_camera(&self) -> Option<&FollowCamera> {
        self.active_camera.as_ref()
    }

    pub fn active_camera_mut(&mut self) -> Option<&mut FollowCamera> {
        self.active_camera.as_mut()
    }

    /// Apply one frame of input to every character, relative to the active camera.
    ///
    /// Jumps are only honored for grounded characters. Fails without touching any
    /// character when there is no active camera.
    pub fn apply_input(&mut self, frame: &InputFrame) -> Result<(), LocomotionError> {
        let camera = self.active_camera.ok_or(LocomotionError::NoCameraAvailable)?;
        for (id, controller) in self.characters.iter_mut() {
            drive(*id, controller, frame, &camera)?;
        }
        Ok(())
    }

    /// Apply input to a single character with an explicit camera.
    pub fn apply_input_to(
        &mut self,
        id: CharacterId,
        frame: &InputFrame,
        camera: Option<&dyn ViewCamera>,
    ) -> Result<(), LocomotionError> {
        let controller = self
            .characters
            .get_mut(&id)
            .ok_or(LocomotionError::UnknownCharacter(id))?;
        let camera = camera.ok_or(LocomotionError::NoCameraAvailable)?;
        drive(id, controller, frame, camera)
    }
}

fn drive<B: CharacterBody, C: ViewCamera + ?Sized>(
    id: CharacterId,
    controller: &mut LocomotionController<B>,
    frame: &InputFrame,
    camera: &C,
) -> Result<(), LocomotionError> {
    controller.move_camera_relative(frame.move_axis, Some(camera))?;
    if frame.jump {
        if controller.is_grounded() {
            controller.jump();
            log::info!("character {id} jumped");
        } else {
            log::debug!("character {id} jump ignored while airborne");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::{
        collision::types::{ColliderId, ContactPoint, Point3, Vec3},
        layers::Layer,
    };

    fn body(collider: u64) -> BodyState {
        BodyState::capsule(Point3::new(0.0, 1.0, 0.0), 0.5, 0.5, ColliderId(collider))
    }

    fn ground(controller: &mut LocomotionController) {
        controller.on_contacts(&[ContactPoint {
            point: Point3::origin(),
            layer: Layer::DEFAULT,
        }]);
    }

    #[test]
    fn ids_are_unique_and_removal_reports_unknown() {
        let mut director = Director::new();
        let a = director.spawn(body(1), LocomotionConfig::default());
        let b = director.spawn(body(2), LocomotionConfig::default());
        assert_ne!(a, b);
        assert_eq!(director.len(), 2);

        assert!(director.remove(a).is_ok());
        let err = director.remove(a).err().unwrap();
        assert!(matches!(err, LocomotionError::UnknownCharacter(id) if id == a));
        assert_eq!(director.len(), 1);
    }

    #[test]
    fn input_without_camera_fails() {
        let mut director = Director::new();
        director.spawn(body(1), LocomotionConfig::default());
        let frame = InputFrame {
            move_axis: Vec2::y(),
            jump: false,
        };
        assert!(matches!(
            director.apply_input(&frame),
            Err(LocomotionError::NoCameraAvailable)
        ));
    }

    #[test]
    fn input_is_camera_relative_for_every_character() {
        let mut director = Director::new();
        let a = director.spawn(body(1), LocomotionConfig::default());
        let b = director.spawn(body(2), LocomotionConfig::default());
        director.set_active_camera(Some(FollowCamera::new(Vec3::zeros(), FRAC_PI_2)));

        let frame = InputFrame {
            move_axis: Vec2::y(),
            jump: false,
        };
        director.apply_input(&frame).unwrap();

        for id in [a, b] {
            let dir = director.get(id).unwrap().desired_move_direction();
            assert!((dir - Vec2::x()).norm() < 1.0e-6);
        }
    }

    #[test]
    fn jump_only_when_grounded() {
        let mut director = Director::new();
        let grounded = director.spawn(body(1), LocomotionConfig::default());
        let airborne = director.spawn(body(2), LocomotionConfig::default());
        director.set_active_camera(Some(FollowCamera::new(Vec3::zeros(), 0.0)));
        ground(director.get_mut(grounded).unwrap());

        let frame = InputFrame {
            move_axis: Vec2::zeros(),
            jump: true,
        };
        director.apply_input(&frame).unwrap();

        let expected = LocomotionConfig::default().jump_speed();
        assert_eq!(director.get(grounded).unwrap().body().velocity.y, expected);
        assert_eq!(director.get(airborne).unwrap().body().velocity.y, 0.0);
    }

    #[test]
    fn single_character_input_checks_id_then_camera() {
        let mut director: Director = Director::new();
        let frame = InputFrame::default();
        let cam = FollowCamera::new(Vec3::zeros(), 0.0);

        assert!(matches!(
            director.apply_input_to(CharacterId(99), &frame, Some(&cam)),
            Err(LocomotionError::UnknownCharacter(CharacterId(99)))
        ));

        let id = director.spawn(body(1), LocomotionConfig::default());
        assert!(matches!(
            director.apply_input_to(id, &frame, None),
            Err(LocomotionError::NoCameraAvailable)
        ));
        assert!(director.apply_input_to(id, &frame, Some(&cam)).is_ok());
    }
}
