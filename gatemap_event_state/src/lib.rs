// Copyright 2025 the Gatemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gatemap Event State: pointer interaction state for diagram surfaces.
//!
//! This crate provides small state machines that need to remember something
//! between pointer events:
//!
//! - [`drag`]: turn successive pointer positions into pan deltas.
//! - [`rect_select`]: arm, draw, commit, and cancel a rectangular selection
//!   clamped to the drawing surface.
//!
//! Both work purely in surface pixel coordinates and know nothing about the
//! data shown on the surface. Callers decide which tool receives an event; a
//! typical host routes pointer events to [`rect_select::RectSelect`] while it
//! is active and to [`drag::PanDrag`] otherwise.
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod rect_select;
