//! Static mapping from raw tag names to display names and categories.

use crate::types::ExifCategory;

use super::format::format_aperture;

/// How a mapped tag's value is rendered.
#[derive(Debug, Clone, Copy)]
pub enum ValueFormat {
    /// The value as-is
    Plain,
    /// The value followed by a unit, separated by a space
    Unit(&'static str),
    /// A custom formatter; must return already-formatted input unchanged
    Custom(fn(&str) -> String),
}

/// Display metadata for one raw tag.
#[derive(Debug, Clone, Copy)]
pub struct ExifPropertyMapping {
    pub display_name: &'static str,
    pub category: ExifCategory,
    pub format: ValueFormat,
}

const fn plain(display_name: &'static str, category: ExifCategory) -> ExifPropertyMapping {
    ExifPropertyMapping {
        display_name,
        category,
        format: ValueFormat::Plain,
    }
}

const fn unit(
    display_name: &'static str,
    category: ExifCategory,
    unit: &'static str,
) -> ExifPropertyMapping {
    ExifPropertyMapping {
        display_name,
        category,
        format: ValueFormat::Unit(unit),
    }
}

const fn custom(
    display_name: &'static str,
    category: ExifCategory,
    format: fn(&str) -> String,
) -> ExifPropertyMapping {
    ExifPropertyMapping {
        display_name,
        category,
        format: ValueFormat::Custom(format),
    }
}

use crate::types::ExifCategory::{Advanced, Camera, Exposure, Gps, Image, Lens, Time, Vendor};

/// Every tag with a known display mapping. Read-only, safe to share.
pub static EXIF_PROPERTY_MAPPINGS: &[(&str, ExifPropertyMapping)] = &[
    // Camera
    ("Make", plain("Camera Make", Camera)),
    ("Model", plain("Camera Model", Camera)),
    ("Software", plain("Software", Camera)),
    ("SerialNumber", plain("Camera Serial Number", Camera)),
    ("BodySerialNumber", plain("Body Serial Number", Camera)),
    ("ImageNumber", plain("Image Number", Camera)),
    // Lens
    ("LensModel", plain("Lens Model", Lens)),
    ("LensMake", plain("Lens Make", Lens)),
    ("LensSpecification", plain("Lens Specification", Lens)),
    ("LensSerialNumber", plain("Lens Serial Number", Lens)),
    ("FocalLength", unit("Focal Length", Lens, "mm")),
    ("FocalLengthIn35mmFilm", unit("35mm Equivalent", Lens, "mm")),
    ("MaxApertureValue", custom("Maximum Aperture", Lens, format_aperture)),
    // Exposure
    ("FNumber", custom("Aperture", Exposure, format_aperture)),
    ("ExposureTime", plain("Shutter Speed", Exposure)),
    ("ISOSpeedRatings", plain("ISO", Exposure)),
    ("ExposureBiasValue", unit("Exposure Compensation", Exposure, "EV")),
    ("ExposureProgram", plain("Exposure Program", Exposure)),
    ("ExposureMode", plain("Exposure Mode", Exposure)),
    ("MeteringMode", plain("Metering Mode", Exposure)),
    ("BrightnessValue", unit("Brightness", Exposure, "EV")),
    ("Flash", plain("Flash", Exposure)),
    ("FlashEnergy", plain("Flash Energy", Exposure)),
    // Image
    ("Image Width", unit("Width", Image, "px")),
    ("Image Height", unit("Height", Image, "px")),
    ("PixelXDimension", unit("Pixel Width", Image, "px")),
    ("PixelYDimension", unit("Pixel Height", Image, "px")),
    ("Orientation", plain("Orientation", Image)),
    ("XResolution", unit("Horizontal Resolution", Image, "dpi")),
    ("YResolution", unit("Vertical Resolution", Image, "dpi")),
    // GPS
    ("GPSLatitude", plain("Latitude", Gps)),
    ("GPSLongitude", plain("Longitude", Gps)),
    ("GPSAltitude", unit("Altitude", Gps, "m")),
    ("GPSSpeed", plain("Speed", Gps)),
    ("GPSSpeedRef", plain("Speed Unit", Gps)),
    ("GPSImgDirection", unit("Camera Direction", Gps, "°")),
    ("GPSDestBearing", unit("Destination Bearing", Gps, "°")),
    ("GPSTrack", unit("Movement Direction", Gps, "°")),
    ("GPSHPositioningError", unit("GPS Accuracy", Gps, "m")),
    ("GPSDOP", plain("GPS Precision", Gps)),
    ("GPSMapDatum", plain("Map Datum", Gps)),
    // Time
    ("DateTime", plain("Date/Time Modified", Time)),
    ("DateTimeOriginal", plain("Date/Time Original", Time)),
    ("DateTimeDigitized", plain("Date/Time Digitized", Time)),
    ("SubSecTimeOriginal", plain("Subsecond Time", Time)),
    ("GPSDateStamp", plain("GPS Date", Time)),
    ("GPSTimeStamp", plain("GPS Time", Time)),
    // Advanced
    ("WhiteBalance", plain("White Balance", Advanced)),
    ("ColorSpace", plain("Color Space", Advanced)),
    ("LightSource", plain("Light Source", Advanced)),
    ("FieldOfView", unit("Field of View", Advanced, "°")),
    ("SceneCaptureType", plain("Scene Capture Type", Advanced)),
    ("SceneType", plain("Scene Type", Advanced)),
    ("SubjectArea", plain("Focus Area", Advanced)),
    ("SubjectDistance", unit("Subject Distance", Advanced, "m")),
    ("SubjectDistanceRange", plain("Distance Range", Advanced)),
    ("DigitalZoomRatio", unit("Digital Zoom", Advanced, "x")),
    ("Contrast", plain("Contrast", Advanced)),
    ("Saturation", plain("Saturation", Advanced)),
    ("Sharpness", plain("Sharpness", Advanced)),
    ("GainControl", plain("Gain Control", Advanced)),
    ("CustomRendered", plain("Custom Processing", Advanced)),
    ("SensingMethod", plain("Sensor Type", Advanced)),
    ("FileSource", plain("File Source", Advanced)),
    ("Artist", plain("Artist/Photographer", Advanced)),
    ("Copyright", plain("Copyright", Advanced)),
    ("ImageDescription", plain("Description", Advanced)),
    ("UserComment", plain("User Comment", Advanced)),
    ("ExifVersion", plain("EXIF Version", Advanced)),
    ("FlashpixVersion", plain("Flashpix Version", Advanced)),
    // Vendor
    ("Lens", plain("Lens Info", Vendor)),
];

/// Look up the mapping for a raw tag name.
pub fn mapping_for(tag_name: &str) -> Option<&'static ExifPropertyMapping> {
    EXIF_PROPERTY_MAPPINGS
        .iter()
        .find(|(name, _)| *name == tag_name)
        .map(|(_, mapping)| mapping)
}

/// Display name for a tag, falling back to the raw name.
pub fn display_name(tag_name: &str) -> &str {
    mapping_for(tag_name)
        .map(|m| m.display_name)
        .unwrap_or(tag_name)
}

/// Category of a tag, if it is mapped.
pub fn category(tag_name: &str) -> Option<ExifCategory> {
    mapping_for(tag_name).map(|m| m.category)
}
