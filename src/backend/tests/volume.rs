use super::utils::*;
use super::*;

const DEVICE: AudioDeviceID = 12;

fn test_volume_system() -> MockAudioSystem {
    init_logging();
    let system = MockAudioSystem::new();
    add_stereo_device(&system, DEVICE, "Speakers");
    system.set(DEVICE, &output_volume_property_address(LEFT_CHANNEL), 0.5f32);
    system.set(DEVICE, &output_volume_property_address(RIGHT_CHANNEL), 0.5f32);
    system
}

#[test]
fn test_channels_are_independent() {
    let system = test_volume_system();
    let controller = VolumeController::new(&system);

    controller.set_volume(DEVICE, LEFT_CHANNEL, 0.2).unwrap();
    controller.set_volume(DEVICE, RIGHT_CHANNEL, 0.8).unwrap();
    assert_eq!(controller.get_volume(DEVICE, LEFT_CHANNEL), Ok(0.2));
    assert_eq!(controller.get_volume(DEVICE, RIGHT_CHANNEL), Ok(0.8));
    assert_eq!(
        system.value::<f32>(DEVICE, &output_volume_property_address(LEFT_CHANNEL)),
        Some(0.2)
    );
}

#[test]
fn test_missing_channel() {
    let system = test_volume_system();
    let controller = VolumeController::new(&system);

    assert_eq!(
        controller.get_volume(DEVICE, 3),
        Err(Error::QueryFailed(UNKNOWN_PROPERTY_ERR))
    );
    assert_eq!(
        controller.set_volume(DEVICE, 3, 1.0),
        Err(Error::QueryFailed(UNKNOWN_PROPERTY_ERR))
    );
}

#[test]
fn test_volume_failure_is_not_a_capability_error() {
    let system = test_volume_system();
    let controller = VolumeController::new(&system);
    system.fail(DEVICE, &output_volume_property_address(RIGHT_CHANNEL), -50);

    assert_eq!(
        controller.set_volume(DEVICE, RIGHT_CHANNEL, 0.1),
        Err(Error::QueryFailed(-50))
    );
    assert_eq!(
        controller.get_volume(DEVICE, RIGHT_CHANNEL),
        Err(Error::QueryFailed(-50))
    );
    assert_eq!(controller.get_volume(DEVICE, LEFT_CHANNEL), Ok(0.5));
}

#[test]
fn test_volume_ramp() {
    let system = test_volume_system();
    let controller = VolumeController::new(&system);

    let mut level = 0.0f32;
    for _ in 0..10 {
        level += 0.1;
        controller.set_volume(DEVICE, LEFT_CHANNEL, level).unwrap();
    }
    let applied = controller.get_volume(DEVICE, LEFT_CHANNEL).unwrap();
    assert!(approx_eq!(f32, applied, 1.0, ulps = 4));
    assert_eq!(controller.get_volume(DEVICE, RIGHT_CHANNEL), Ok(0.5));
}
