//! 颜色预处理
//!
//! RGB 图像 → HSV → 二值掩码。
//!
//! # HSV 约定
//!
//! 与 OpenCV 8 位 `COLOR_RGB2HSV` 相同：
//!
//! - `H ∈ [0, 180)`（角度 / 2）
//! - `S, V ∈ [0, 255]`
//! - 定点运算，`hsv_shift = 12`，除法表四舍六入五成双
//!
//! # 掩码
//!
//! 三个通道都落在 `[lower, upper]`（闭区间）内的像素为 `255`，否则为 `0`。

use crate::error::VisionError;
use image::{GrayImage, Luma, RgbImage};
use std::sync::LazyLock;

/// 默认 HSV 下界
pub const DEFAULT_LOWER_HSV: [u8; 3] = [0, 0, 69];

/// 默认 HSV 上界
pub const DEFAULT_UPPER_HSV: [u8; 3] = [28, 233, 255];

/// 掩码中"在区间内"的像素值
pub const MASK_ON: u8 = 255;

const HSV_SHIFT: i32 = 12;
const HSV_ROUND: i32 = 1 << (HSV_SHIFT - 1);
const HUE_RANGE: i32 = 180;

/// `sdiv[v] = round((255 << 12) / v)`
static SDIV_TABLE: LazyLock<[i32; 256]> = LazyLock::new(|| {
    let mut table = [0; 256];
    for (i, slot) in table.iter_mut().enumerate().skip(1) {
        *slot = (f64::from(255 << HSV_SHIFT) / i as f64).round_ties_even() as i32;
    }
    table
});

/// `hdiv[d] = round((180 << 12) / (6 * d))`
static HDIV_TABLE: LazyLock<[i32; 256]> = LazyLock::new(|| {
    let mut table = [0; 256];
    for (i, slot) in table.iter_mut().enumerate().skip(1) {
        *slot = (f64::from(HUE_RANGE << HSV_SHIFT) / (6.0 * i as f64)).round_ties_even() as i32;
    }
    table
});

/// 单像素 RGB → HSV
///
/// ```rust
/// use duckie_vision::rgb_to_hsv;
///
/// assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
/// assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
/// assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
/// ```
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(i32::from);

    let v = r.max(g).max(b);
    let vmin = r.min(g).min(b);
    let diff = v - vmin;

    let s = (diff * SDIV_TABLE[v as usize] + HSV_ROUND) >> HSV_SHIFT;

    // 最大分量为 R 时优先，其次 G
    let sector = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = (sector * HDIV_TABLE[diff as usize] + HSV_ROUND) >> HSV_SHIFT;
    if h < 0 {
        h += HUE_RANGE;
    }

    [h.clamp(0, 255) as u8, s.clamp(0, 255) as u8, v as u8]
}

/// HSV 闭区间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HsvRange {
    /// 下界 `[h, s, v]`
    pub lower: [u8; 3],

    /// 上界 `[h, s, v]`
    pub upper: [u8; 3],
}

impl HsvRange {
    /// 创建区间 `[lower, upper]`
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// 三个通道是否都在区间内
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }

    /// 下界不能大于上界
    pub fn validate(&self) -> Result<(), VisionError> {
        for channel in 0..3 {
            let (lower, upper) = (self.lower[channel], self.upper[channel]);
            if lower > upper {
                return Err(VisionError::InvalidRange {
                    channel,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::new(DEFAULT_LOWER_HSV, DEFAULT_UPPER_HSV)
    }
}

/// 使用默认 HSV 区间生成掩码
pub fn preprocess(image: &RgbImage) -> GrayImage {
    preprocess_with(image, &HsvRange::default())
}

/// 使用指定 HSV 区间生成掩码
pub fn preprocess_with(image: &RgbImage, range: &HsvRange) -> GrayImage {
    let mask = GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([mask_value(image.get_pixel(x, y).0, range)])
    });

    tracing::debug!(
        "Preprocessed {}x{} image, mask coverage {:.3}",
        image.width(),
        image.height(),
        mask_coverage(&mask)
    );
    mask
}

/// 从原始 `height × width × channels` 缓冲区（行优先，RGB 交错）生成掩码
pub fn preprocess_buffer(
    buf: &[u8],
    height: u32,
    width: u32,
    channels: usize,
    range: &HsvRange,
) -> Result<GrayImage, VisionError> {
    if height == 0 || width == 0 {
        return Err(VisionError::InvalidShape {
            rows: height as usize,
            cols: width as usize,
        });
    }
    if channels != 3 {
        return Err(VisionError::InvalidChannelCount(channels));
    }

    let expected = (height as usize)
        .checked_mul(width as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(VisionError::BufferSizeMismatch {
            expected: usize::MAX,
            actual: buf.len(),
        })?;
    if buf.len() != expected {
        return Err(VisionError::BufferSizeMismatch {
            expected,
            actual: buf.len(),
        });
    }

    let data: Vec<u8> = buf
        .chunks_exact(3)
        .map(|px| mask_value([px[0], px[1], px[2]], range))
        .collect();

    GrayImage::from_raw(width, height, data).ok_or(VisionError::BufferSizeMismatch {
        expected,
        actual: buf.len(),
    })
}

/// 掩码中非零像素的比例
pub fn mask_coverage(mask: &GrayImage) -> f64 {
    let total = mask.as_raw().len();
    if total == 0 {
        return 0.0;
    }
    let on = mask.as_raw().iter().filter(|&&p| p != 0).count();
    on as f64 / total as f64
}

#[inline]
fn mask_value(rgb: [u8; 3], range: &HsvRange) -> u8 {
    if range.contains(rgb_to_hsv(rgb)) { MASK_ON } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_division_tables() {
        assert_eq!(SDIV_TABLE[0], 0);
        assert_eq!(SDIV_TABLE[255], 4096);
        assert_eq!(SDIV_TABLE[200], 5222);
        assert_eq!(HDIV_TABLE[0], 0);
        assert_eq!(HDIV_TABLE[255], 482);
        assert_eq!(HDIV_TABLE[150], 819);
    }

    #[test]
    fn test_rgb_to_hsv_primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
        // 负色相回绕
        assert_eq!(rgb_to_hsv([255, 0, 255]), [150, 255, 255]);
    }

    #[test]
    fn test_rgb_to_hsv_grays() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(rgb_to_hsv([255, 255, 255]), [0, 0, 255]);
    }

    #[test]
    fn test_rgb_to_hsv_orange() {
        // diff = 150, s = (150 * 5222 + 2048) >> 12 = 191
        // h = (50 * 819 + 2048) >> 12 = 10
        assert_eq!(rgb_to_hsv([200, 100, 50]), [10, 191, 200]);
    }

    #[test]
    fn test_default_range() {
        let range = HsvRange::default();
        assert_eq!(range.lower, [0, 0, 69]);
        assert_eq!(range.upper, [28, 233, 255]);
        assert!(range.contains([0, 0, 69]));
        assert!(range.contains([28, 233, 255]));
        assert!(!range.contains([29, 100, 100]));
        assert!(!range.contains([10, 234, 100]));
        assert!(!range.contains([10, 100, 68]));
    }

    #[test]
    fn test_validate_range() {
        assert!(HsvRange::default().validate().is_ok());
        assert_eq!(
            HsvRange::new([0, 50, 0], [10, 40, 255]).validate(),
            Err(VisionError::InvalidRange {
                channel: 1,
                lower: 50,
                upper: 40
            })
        );
    }

    #[test]
    fn test_preprocess_mask_values() {
        let mut image = RgbImage::new(4, 1);
        image.put_pixel(0, 0, Rgb([200, 100, 50])); // 橙色，在区间内
        image.put_pixel(1, 0, Rgb([0, 0, 255])); // 蓝色，色相超界
        image.put_pixel(2, 0, Rgb([10, 10, 10])); // 太暗
        image.put_pixel(3, 0, Rgb([255, 255, 255])); // 白色，在区间内

        let mask = preprocess(&image);
        assert_eq!(mask.dimensions(), (4, 1));
        assert_eq!(mask.as_raw(), &vec![255, 0, 0, 255]);
        assert!((mask_coverage(&mask) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_preprocess_buffer_matches_image() {
        let raw = vec![200, 100, 50, 0, 0, 255, 10, 10, 10, 255, 255, 255];
        let from_buffer = preprocess_buffer(&raw, 2, 2, 3, &HsvRange::default()).unwrap();

        let image = RgbImage::from_raw(2, 2, raw).unwrap();
        assert_eq!(from_buffer, preprocess(&image));
    }

    #[test]
    fn test_preprocess_buffer_errors() {
        let range = HsvRange::default();
        assert_eq!(
            preprocess_buffer(&[0; 8], 2, 1, 4, &range),
            Err(VisionError::InvalidChannelCount(4))
        );
        assert_eq!(
            preprocess_buffer(&[0; 5], 1, 2, 3, &range),
            Err(VisionError::BufferSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            preprocess_buffer(&[], 0, 2, 3, &range),
            Err(VisionError::InvalidShape { rows: 0, cols: 2 })
        );
    }

    #[test]
    fn test_preprocess_buffer_size_overflow() {
        let err = preprocess_buffer(&[], u32::MAX, u32::MAX, 3, &HsvRange::default()).unwrap_err();
        assert!(matches!(err, VisionError::BufferSizeMismatch { actual: 0, .. }));
    }

    #[test]
    fn test_empty_image() {
        let mask = preprocess(&RgbImage::new(0, 0));
        assert_eq!(mask.dimensions(), (0, 0));
        assert_eq!(mask_coverage(&mask), 0.0);
    }
}
