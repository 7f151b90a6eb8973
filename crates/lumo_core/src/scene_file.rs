//! Scene file parsing and loading.
//!
//! Scene files are whitespace-delimited token streams:
//!
//! ```text
//! <recursionDepth> <imageDimension>
//! <objectCount>
//! sphere   cx cy cz radius                          r g b  ka kd ks kr  shininess
//! triangle x1 y1 z1 x2 y2 z2 x3 y3 z3               r g b  ka kd ks kr  shininess
//! general  A B C D E F G H I J  rx ry rz  l w h     r g b  ka kd ks kr  shininess
//! <pointLightCount>
//! px py pz  r g b
//! <spotLightCount>
//! px py pz  r g b  dx dy dz  cutoffDegrees
//! ```
//!
//! Parsing fails fast: a missing or malformed token aborts the load with the
//! line it was found on.

use std::collections::VecDeque;
use std::path::Path;
use std::str::FromStr;

use lumo_math::DVec3;
use thiserror::Error;

use crate::scene::{
    Coefficients, Color, Material, PointLight, SceneDescription, SceneObject, Shape, SpotLight,
};

/// Errors that can occur while parsing a scene description.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of file while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid number at line {line}: expected {expected}, found {token:?}")]
    InvalidNumber {
        line: usize,
        expected: &'static str,
        token: String,
    },

    #[error("Unknown object type at line {line}: {kind:?}")]
    UnknownObject { line: usize, kind: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot open scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Token stream parser for scene descriptions.
pub struct SceneParser<'a> {
    tokens: VecDeque<(usize, &'a str)>,
}

impl<'a> SceneParser<'a> {
    /// Create a new parser from file contents.
    pub fn new(content: &'a str) -> Self {
        let tokens = content
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |token| (i + 1, token)))
            .collect();

        Self { tokens }
    }

    /// Parse the whole description.
    pub fn parse(&mut self) -> ParseResult<SceneDescription> {
        let max_depth = self.next_number("recursion depth")?;
        let image_size = self.next_number("image dimension")?;
        let mut desc = SceneDescription::new(max_depth, image_size);

        let object_count: usize = self.next_number("object count")?;
        for _ in 0..object_count {
            desc.objects.push(self.parse_object()?);
        }

        let point_count: usize = self.next_number("point light count")?;
        for _ in 0..point_count {
            desc.point_lights.push(self.parse_point_light()?);
        }

        let spot_count: usize = self.next_number("spotlight count")?;
        for _ in 0..spot_count {
            let light = self.parse_point_light()?;
            let direction = self.next_vec3("spotlight direction")?;
            let cutoff = self.next_number("spotlight cutoff")?;
            desc.spot_lights.push(SpotLight::new(light, direction, cutoff));
        }

        if let Some((line, _)) = self.tokens.front() {
            log::warn!(
                "Ignoring {} trailing tokens starting at line {}",
                self.tokens.len(),
                line
            );
        }

        Ok(desc)
    }

    /// Parse one `sphere`, `triangle` or `general` entry.
    fn parse_object(&mut self) -> ParseResult<SceneObject> {
        let (line, kind) = self.next_token("object type")?;

        let shape = match kind {
            "sphere" => Shape::Sphere {
                center: self.next_vec3("sphere center")?,
                radius: self.next_number("sphere radius")?,
            },
            "triangle" => Shape::Triangle {
                a: self.next_vec3("triangle vertex")?,
                b: self.next_vec3("triangle vertex")?,
                c: self.next_vec3("triangle vertex")?,
            },
            "general" => {
                let mut coefficients = [0.0; 10];
                for coefficient in &mut coefficients {
                    *coefficient = self.next_number("quadric coefficient")?;
                }
                Shape::Quadric {
                    coefficients,
                    corner: self.next_vec3("quadric reference point")?,
                    extent: self.next_vec3("quadric box extent")?,
                }
            }
            other => {
                return Err(ParseError::UnknownObject {
                    line,
                    kind: other.to_string(),
                })
            }
        };

        let material = self.parse_material()?;
        Ok(SceneObject { shape, material })
    }

    /// Parse `r g b  ambient diffuse specular reflective  shininess`.
    fn parse_material(&mut self) -> ParseResult<Material> {
        let color: Color = self.next_vec3("color")?;
        let coefficients = Coefficients::new(
            self.next_number("ambient coefficient")?,
            self.next_number("diffuse coefficient")?,
            self.next_number("specular coefficient")?,
            self.next_number("reflection coefficient")?,
        );
        let shininess = self.next_number("shininess")?;

        Ok(Material::new(color, coefficients, shininess))
    }

    fn parse_point_light(&mut self) -> ParseResult<PointLight> {
        let position = self.next_vec3("light position")?;
        let color = self.next_vec3("light color")?;
        Ok(PointLight::new(position, color))
    }

    fn next_token(&mut self, expected: &'static str) -> ParseResult<(usize, &'a str)> {
        self.tokens
            .pop_front()
            .ok_or(ParseError::UnexpectedEof(expected))
    }

    fn next_number<T: FromStr>(&mut self, expected: &'static str) -> ParseResult<T> {
        let (line, token) = self.next_token(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            line,
            expected,
            token: token.to_string(),
        })
    }

    fn next_vec3(&mut self, expected: &'static str) -> ParseResult<DVec3> {
        Ok(DVec3::new(
            self.next_number(expected)?,
            self.next_number(expected)?,
            self.next_number(expected)?,
        ))
    }
}

/// Parse a scene description from a string.
pub fn parse_scene(content: &str) -> ParseResult<SceneDescription> {
    SceneParser::new(content).parse()
}

/// Load and parse a scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let desc = parse_scene(&content)?;
    desc.log_summary();
    Ok(desc)
}
