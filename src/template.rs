//! Embedded XML fragments for the Hydrogen song format.
//!
//! `SONG_TEMPLATE` is a complete, valid `.h2song` document with empty
//! pattern containers; the document builder streams it and injects the
//! converted patterns, the sequence, and the instrument list.
//! `GM_ROCK_KIT_INSTRUMENT_LIST` is the default drumkit used when the
//! user does not import one, laid out along the General MIDI drum map
//! starting at key 36.

pub const SONG_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<song>
    <version>1.2.2</version>
    <bpm>120</bpm>
    <volume>0.5</volume>
    <metronomeVolume>0.5</metronomeVolume>
    <name>Untitled Song</name>
    <author>Unknown Author</author>
    <notes>Converted from MIDI</notes>
    <license>undefined license</license>
    <loopEnabled>false</loopEnabled>
    <patternModeMode>true</patternModeMode>
    <playbackTrackFilename></playbackTrackFilename>
    <playbackTrackEnabled>false</playbackTrackEnabled>
    <playbackTrackVolume>0.0</playbackTrackVolume>
    <action_mode>0</action_mode>
    <isPatternEditorLocked>false</isPatternEditorLocked>
    <isTimelineActivated>false</isTimelineActivated>
    <humanize_time>0</humanize_time>
    <humanize_velocity>0</humanize_velocity>
    <swing_factor>0</swing_factor>
    <mode>song</mode>
    <pan_law_type>RATIO_STRAIGHT_POLYGONAL</pan_law_type>
    <pan_law_k_norm>1.33333</pan_law_k_norm>
    <patternList>
    </patternList>
    <virtualPatterns>
    </virtualPatterns>
    <patternSequence>
    </patternSequence>
    <ladspa>
    </ladspa>
    <BPMTimeLine>
    </BPMTimeLine>
    <timeLineTag>
    </timeLineTag>
</song>
"#;

pub const GM_ROCK_KIT_INSTRUMENT_LIST: &str = r#"<instrumentList>
    <instrument>
        <id>0</id>
        <name>Kick</name>
        <drumkit>GMRockKit</drumkit>
        <drumkitPath>/usr/share/hydrogen/data/drumkits/GMRockKit</drumkitPath>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>1</id>
        <name>Stick</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>2</id>
        <name>Snare Jazz</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>3</id>
        <name>Hand Clap</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>4</id>
        <name>Snare Rock</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>5</id>
        <name>Tom Low</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>6</id>
        <name>HH Closed</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>7</id>
        <name>Tom Mid</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>8</id>
        <name>HH Pedal</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>9</id>
        <name>Tom Hi</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>10</id>
        <name>HH Open</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>11</id>
        <name>Cymbal 1</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>12</id>
        <name>Crash</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>13</id>
        <name>Ride</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>14</id>
        <name>Bell</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
    <instrument>
        <id>15</id>
        <name>Cymbal 2</name>
        <drumkit>GMRockKit</drumkit>
        <volume>1</volume>
        <isMuted>false</isMuted>
    </instrument>
</instrumentList>
"#;
