/// Default model input resolution. YOLO-family exports take a square
/// 640x640 input unless retrained otherwise.
pub const DEFAULT_INPUT_SIZE: (u32, u32) = (640, 640);
