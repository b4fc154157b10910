/*!
Native attribute values: `CFType` runtime tags, geometry wrappers and the two
`CFString` UTF-8 extraction paths.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use objc2_application_services::{AXUIElement, AXValue, AXValueType};
use objc2_core_foundation::{
  CFArray, CFBoolean, CFRetained, CFString, CFType, CGPoint, CGSize, Type,
};
use std::ffi::{c_char, c_void, CStr};
use std::ptr::NonNull;

use super::handles::MacHandle;
use super::mapping::{geometry_from_macos, Geometry};
use crate::platform::{NativeKind, NativeText, NativeValue};
use crate::types::{Point, Size, Status};

const UTF8: u32 = 0x0800_0100; // kCFStringEncodingUTF8

// CFString accessors needed for the borrowed/copied UTF-8 paths, and the raw
// type id for unrecognized values.
extern "C" {
  fn CFStringGetLength(string: *const c_void) -> isize;
  fn CFStringGetCStringPtr(string: *const c_void, encoding: u32) -> *const c_char;
  fn CFStringGetMaximumSizeForEncoding(length: isize, encoding: u32) -> isize;
  fn CFStringGetCString(
    string: *const c_void,
    buffer: *mut c_char,
    buffer_size: isize,
    encoding: u32,
  ) -> u8;
  fn CFGetTypeID(cf: *const c_void) -> usize;
}

/// Owned `CFTypeRef` returned by an attribute read.
pub(crate) struct MacValue(CFRetained<CFType>);

impl MacValue {
  pub(super) const fn new(value: CFRetained<CFType>) -> Self {
    Self(value)
  }

  pub(super) fn as_cf(&self) -> &CFType {
    &self.0
  }

  fn geometry(value: &AXValue) -> NativeKind<'_, Self> {
    let value_type = unsafe { value.r#type() };
    match geometry_from_macos(value_type) {
      Geometry::Point => {
        let mut point = CGPoint { x: 0.0, y: 0.0 };
        let ok = unsafe { value.value(value_type, NonNull::from(&mut point).cast()) };
        NativeKind::Point(ok.then(|| Point::new(point.x, point.y)))
      }
      Geometry::Size => {
        let mut size = CGSize {
          width: 0.0,
          height: 0.0,
        };
        let ok = unsafe { value.value(value_type, NonNull::from(&mut size).cast()) };
        NativeKind::Size(ok.then(|| Size::new(size.width, size.height)))
      }
      Geometry::Rect => NativeKind::Rect,
      Geometry::Other(kind) => NativeKind::OtherGeometry(kind),
    }
  }

  fn wrap_geometry<T>(value_type: AXValueType, mut payload: T) -> Result<Self, Status> {
    let value = unsafe { AXValue::new(value_type, NonNull::from(&mut payload).cast()) }
      .ok_or(Status::IllegalArgument)?;
    // SAFETY: every AXValue is a CFType
    Ok(Self(unsafe { CFRetained::cast_unchecked(value) }))
  }
}

impl NativeValue for MacValue {
  type Handle = MacHandle;
  type Text = CFString;

  fn kind(&self) -> NativeKind<'_, Self> {
    let value: &CFType = &self.0;
    if let Some(text) = value.downcast_ref::<CFString>() {
      return NativeKind::String(text);
    }
    if let Some(boolean) = value.downcast_ref::<CFBoolean>() {
      return NativeKind::Boolean(boolean.as_bool());
    }
    if let Some(element) = value.downcast_ref::<AXUIElement>() {
      return NativeKind::Element(MacHandle::new(element.retain()));
    }
    if let Some(geometry) = value.downcast_ref::<AXValue>() {
      return Self::geometry(geometry);
    }
    if let Some(array) = value.downcast_ref::<CFArray>() {
      // SAFETY: every CFArray element is a CFType
      let array = unsafe { array.cast_unchecked::<CFType>() };
      let items = (0..array.len())
        .filter_map(|i| array.get(i))
        .map(Self)
        .collect();
      return NativeKind::Array(items);
    }
    let type_id = unsafe { CFGetTypeID(CFRetained::as_ptr(&self.0).as_ptr().cast()) };
    NativeKind::Unknown(type_id)
  }

  fn from_point(point: Point) -> Result<Self, Status> {
    Self::wrap_geometry(AXValueType::CGPoint, CGPoint { x: point.x, y: point.y })
  }

  fn from_size(size: Size) -> Result<Self, Status> {
    Self::wrap_geometry(
      AXValueType::CGSize,
      CGSize {
        width: size.width,
        height: size.height,
      },
    )
  }

  fn from_bool(value: bool) -> Result<Self, Status> {
    // SAFETY: every CFBoolean is a CFType
    Ok(Self(unsafe { CFRetained::cast_unchecked(CFBoolean::new(value).retain()) }))
  }
}

fn cf_ptr(string: &CFString) -> *const c_void {
  (string as *const CFString).cast()
}

impl NativeText for CFString {
  fn utf16_len(&self) -> usize {
    unsafe { CFStringGetLength(cf_ptr(self)) }.max(0) as usize
  }

  fn borrowed_utf8(&self) -> Option<&CStr> {
    let ptr = unsafe { CFStringGetCStringPtr(cf_ptr(self), UTF8) };
    // SAFETY: non-null results point into the string's own storage, which
    // lives as long as `self`.
    (!ptr.is_null()).then(|| unsafe { CStr::from_ptr(ptr) })
  }

  fn max_utf8_size(&self) -> usize {
    let length = unsafe { CFStringGetLength(cf_ptr(self)) };
    unsafe { CFStringGetMaximumSizeForEncoding(length, UTF8) }.max(0) as usize + 1
  }

  fn copy_utf8(&self, buffer: &mut [u8]) -> bool {
    unsafe {
      CFStringGetCString(
        cf_ptr(self),
        buffer.as_mut_ptr().cast(),
        buffer.len() as isize,
        UTF8,
      ) != 0
    }
  }
}

// Values are immutable CF objects once returned by the service.
unsafe impl Send for MacValue {}
unsafe impl Sync for MacValue {}
