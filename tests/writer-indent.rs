use xml_emit::name::QName;
use xml_emit::settings::{ConformanceLevel, WriterSettings};
use xml_emit::RawWrite;

use pretty_assertions::assert_eq;

mod helpers;
use helpers::{attribute, element, render, settings, text_element};

fn indented() -> WriterSettings {
    settings(|s| s.indent = true)
}

#[test]
fn simple() {
    let xml = render(&indented(), |w| {
        w.write_xml_declaration(None)?;
        element(w, QName::local("a"), |w| text_element(w, "b", "x"))
    });
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <a>\n  \
           <b>x</b>\n\
         </a>"
    );
}

#[test]
fn nested() {
    let xml = render(&indented(), |w| {
        element(w, QName::local("a"), |w| {
            text_element(w, "b", "x")?;
            element(w, QName::local("c"), |_| Ok(()))?;
            w.write_comment("note")?;
            w.write_pi("pi", "")?;
            element(w, QName::local("d"), |w| {
                element(w, QName::local("e"), |w| text_element(w, "f", "y"))
            })
        })?;
        w.write_comment("end")
    });
    assert_eq!(
        xml,
        "<a>\n  \
           <b>x</b>\n  \
           <c />\n  \
           <!--note-->\n  \
           <?pi?>\n  \
           <d>\n    \
             <e>\n      \
               <f>y</f>\n    \
             </e>\n  \
           </d>\n\
         </a>\n\
         <!--end-->"
    );
}

/// Whitespace is never inserted into elements which contain text
#[test]
fn mixed_content() {
    let xml = render(&indented(), |w| {
        element(w, QName::local("a"), |w| {
            element(w, QName::local("p"), |w| {
                w.write_text("t")?;
                element(w, QName::local("b"), |w| {
                    element(w, QName::local("i"), |_| Ok(()))
                })?;
                w.write_comment("c")
            })?;
            element(w, QName::local("q"), |_| Ok(()))
        })
    });
    assert_eq!(
        xml,
        "<a>\n  \
           <p>t<b><i /></b><!--c--></p>\n  \
           <q />\n\
         </a>"
    );
}

#[test]
fn text_like_calls() {
    let xml = render(&indented(), |w| {
        element(w, QName::local("a"), |w| {
            element(w, QName::local("b"), |w| {
                w.write_cdata("x")?;
                element(w, QName::local("c"), |_| Ok(()))
            })?;
            element(w, QName::local("d"), |w| {
                w.write_entity_ref("e")?;
                element(w, QName::local("c"), |_| Ok(()))
            })?;
            element(w, QName::local("f"), |w| {
                w.write_base64(b"1")?;
                w.write_end_base64()?;
                element(w, QName::local("c"), |_| Ok(()))
            })
        })
    });
    assert_eq!(
        xml,
        "<a>\n  \
           <b><![CDATA[x]]><c /></b>\n  \
           <d>&e;<c /></d>\n  \
           <f>MQ==<c /></f>\n\
         </a>"
    );
}

#[test]
fn attributes_on_new_lines() {
    let settings = settings(|s| {
        s.indent = true;
        s.new_line_on_attributes = true;
    });
    let xml = render(&settings, |w| {
        w.write_start_element(QName::local("a"))?;
        attribute(w, QName::local("x"), "1")?;
        attribute(w, QName::local("y"), "2")?;
        w.start_element_content()?;

        w.write_start_element(QName::local("b"))?;
        attribute(w, QName::local("z"), "3")?;
        w.start_element_content()?;
        w.write_end_element(QName::local("b"))?;

        w.write_end_element(QName::local("a"))
    });
    assert_eq!(
        xml,
        "<a\n  \
           x=\"1\"\n  \
           y=\"2\">\n  \
           <b\n    \
             z=\"3\" />\n\
         </a>"
    );
}

#[test]
fn custom_chars() {
    let settings = settings(|s| {
        s.indent = true;
        s.indent_chars = "\t".into();
        s.new_line_chars = "\r\n".into();
    });
    let xml = render(&settings, |w| {
        element(w, QName::local("a"), |w| {
            element(w, QName::local("b"), |w| text_element(w, "c", ""))
        })
    });
    assert_eq!(xml, "<a>\r\n\t<b>\r\n\t\t<c />\r\n\t</b>\r\n</a>");
}

mod fragment {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fragment() -> WriterSettings {
        settings(|s| {
            s.indent = true;
            s.conformance_level = ConformanceLevel::Fragment;
        })
    }

    #[test]
    fn elements() {
        let xml = render(&fragment(), |w| {
            element(w, QName::local("a"), |w| {
                element(w, QName::local("b"), |_| Ok(()))
            })?;
            element(w, QName::local("c"), |_| Ok(()))
        });
        assert_eq!(xml, "<a>\n  <b />\n</a>\n<c />");
    }

    /// Top-level text makes the whole fragment mixed
    #[test]
    fn top_level_text() {
        let xml = render(&fragment(), |w| {
            w.write_text("t")?;
            element(w, QName::local("a"), |w| {
                element(w, QName::local("b"), |_| Ok(()))
            })
        });
        assert_eq!(xml, "t<a><b /></a>");
    }

    /// In a document, the root element starts with non-mixed content even
    /// after top-level text
    #[test]
    fn document_root() {
        let xml = render(&indented(), |w| {
            w.write_whitespace(" ")?;
            element(w, QName::local("a"), |w| {
                element(w, QName::local("b"), |_| Ok(()))
            })
        });
        assert_eq!(xml, " <a>\n  <b />\n</a>");
    }
}
