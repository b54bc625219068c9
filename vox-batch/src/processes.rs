//! Names of the library processes and the datatypes they commit.

/// Creates a scene from an XML descriptor bound as the parameter file
pub const CREATE_SCENE: &str = "boxmCreateSceneProcess";

/// Loads a perspective camera (KRT text file)
pub const LOAD_PERSPECTIVE_CAMERA: &str = "vpglLoadPerspectiveCameraProcess";

/// Loads an image into a view
pub const LOAD_IMAGE_VIEW: &str = "vilLoadImageViewProcess";

/// Updates scene occupancy from an image and its camera
pub const UPDATE_SCENE: &str = "boxmUpdateProcess";

/// Writes scene occupancy as a raw volume
pub const SAVE_OCCUPANCY_RAW: &str = "boxmSaveOccupancyRawProcess";

pub const SCENE_TYPE: &str = "boxm_scene_parser";
pub const CAMERA_TYPE: &str = "vpgl_camera_double_sptr";
pub const IMAGE_TYPE: &str = "vil_image_view_base_sptr";

/// Datatype the library commits as output 0 of `process`, if known.
pub fn output_type(process: &str) -> Option<&'static str> {
    match process {
        CREATE_SCENE => Some(SCENE_TYPE),
        LOAD_PERSPECTIVE_CAMERA => Some(CAMERA_TYPE),
        LOAD_IMAGE_VIEW => Some(IMAGE_TYPE),
        _ => None,
    }
}
